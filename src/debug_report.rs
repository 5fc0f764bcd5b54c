use roadlex::{AnalysisReport, PassMetrics, Street, Vehicle};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_report(paragraph: &str, report: &AnalysisReport, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Analyzing: \"{}\"", paragraph.trim()), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Scene ━━━", ansi::GRAY));
    println!(
        "  Intersection: {}  │  Directions complete: {}",
        palette.paint(report.intersection.to_string(), ansi::BLUE),
        if report.directions_complete { palette.paint("✓ yes", ansi::GREEN) } else { palette.paint("✗ no", ansi::YELLOW) }
    );

    println!("\n{}", palette.paint("━━━ Streets ━━━", ansi::GRAY));
    if report.streets.is_empty() {
        println!("{}", palette.dim("  No streets produced"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • No direction word had a road or lane word nearby");
        println!("  • No road-type word is known to the ontology");
        println!("  • The parser fixture has no entry for the sentences");
        println!("\n{}", palette.dim("  Tip: Set RUST_LOG=roadlex=debug to see each pass"));
    } else {
        for (idx, street) in report.streets.iter().enumerate() {
            print_street(idx, street, &palette);
        }
    }

    if !report.vehicles.is_empty() {
        println!("\n{}", palette.paint("━━━ Vehicles ━━━", ansi::GRAY));
        for vehicle in &report.vehicles {
            print_vehicle(vehicle, &palette);
        }
    }

    println!("\n{}", palette.paint("━━━ Passes ━━━", ansi::GRAY));
    if report.metrics.junction_streets > 0 {
        println!("  {} {}", palette.paint("Junction:", ansi::BLUE), palette.dim(format!("+{} streets", report.metrics.junction_streets)));
    }
    print_pass("Direction:", &report.metrics.direction, &palette);
    print_pass("Fallback:", &report.metrics.fallback, &palette);
    print_pass("Parking:", &report.metrics.parking, &palette);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Direction: {}  │  Fallback: {}  │  Parking: {}",
        palette.paint(format!("{:?}", report.metrics.total), ansi::GREEN),
        palette.paint(format!("{:?}", report.metrics.direction.duration), ansi::CYAN),
        palette.dim(format!("{:?}", report.metrics.fallback.duration)),
        palette.dim(format!("{:?}", report.metrics.parking.duration)),
    );
    println!();
}

fn print_street(idx: usize, street: &Street, palette: &ansi::Palette) {
    let heading = street.navigation.map(|c| c.to_string()).unwrap_or_else(|| "?".to_string());
    let road_type = street.road_type.as_deref().unwrap_or("road");
    println!(
        "  {} {} {} {}",
        palette.paint(format!("[{}]", idx), ansi::GRAY),
        palette.bold(palette.paint(road_type, ansi::GREEN)),
        palette.dim("│ heading"),
        palette.paint(heading, ansi::YELLOW),
    );

    let props: Vec<String> = street
        .properties()
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, palette.paint(value, ansi::CYAN)))
        .collect();
    if !props.is_empty() {
        println!("      {}", props.join(palette.dim(" │ ").as_str()));
    }
}

fn print_vehicle(vehicle: &Vehicle, palette: &ansi::Palette) {
    let lane = vehicle.travel_lane.map(|l| l.to_string()).unwrap_or_else(|| "-".to_string());
    println!(
        "  {} {} {} {} {}",
        palette.paint(&vehicle.id, ansi::BLUE),
        palette.dim("on roadway:"),
        if vehicle.on_roadway { palette.paint("yes", ansi::GREEN) } else { palette.dim("no") },
        palette.dim("lane:"),
        palette.paint(lane, ansi::YELLOW),
    );
}

fn print_pass(label: &str, pass: &PassMetrics, palette: &ansi::Palette) {
    if !pass.ran {
        println!("  {} {}", palette.paint(label, ansi::BLUE), palette.dim("skipped"));
        return;
    }
    println!(
        "  {} {}  {} {}",
        palette.paint(label, ansi::BLUE),
        palette.paint(format!("✓ {} sentences", pass.sentences), ansi::GREEN),
        if pass.skipped > 0 { palette.paint(format!("{} unparsed", pass.skipped), ansi::YELLOW) } else { palette.dim("0 unparsed") },
        palette.dim(format!("+{} streets", pass.streets_created)),
    );
}
