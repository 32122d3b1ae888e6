//! Terminal colours for verdict labels and log levels.

pub const GREEN: &str = "\x1b[32m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const GREY: &str = "\x1b[38m";
pub const YELLOW: &str = "\x1b[33m";
pub const RED: &str = "\x1b[31m";
pub const BOLD_RED: &str = "\x1b[1;31m";
pub const RESET: &str = "\x1b[0m";

pub fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{RESET}")
}

pub fn green(text: &str) -> String {
    paint(GREEN, text)
}

pub fn blue(text: &str) -> String {
    paint(BLUE, text)
}

pub fn red(text: &str) -> String {
    paint(RED, text)
}

pub fn bold_red(text: &str) -> String {
    paint(BOLD_RED, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_with_reset() {
        assert_eq!(green("ok"), "\x1b[32mok\x1b[0m");
    }
}
