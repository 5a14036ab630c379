use console::style;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(48));
    }

    /// One framework verdict line: name, version if known, provenance dimmed
    pub fn detection(&self, framework: &str, version: Option<&str>, provenance: &str) {
        println!(
            "{} {} {} {}",
            style("✓").green(),
            style(framework).bold(),
            version.unwrap_or("unknown version"),
            style(format!("({})", provenance)).dim()
        );
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
