//! Lexical rules: vocabulary, word predicates and numeral helpers used by the
//! analysis passes in `engine`.

pub mod numeral;
pub mod predicates;
pub mod vocabulary;
