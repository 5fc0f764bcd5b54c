/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// Patterns are literals checked by tests, so a failed compile is a
/// programming error rather than a runtime condition.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a lazily-initialized `HashSet<&'static str>` from word literals.
///
/// ```text
/// word_set!["first", "second"] -> &'static HashSet<&'static str>
/// ```
#[macro_export]
macro_rules! word_set {
    [ $($word:literal),* $(,)? ] => {{
        static SET: once_cell::sync::Lazy<std::collections::HashSet<&'static str>> =
            once_cell::sync::Lazy::new(|| [ $($word),* ].into_iter().collect());
        &*SET
    }};
}
