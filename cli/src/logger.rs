use ansi_term::{ANSIString, Color, Style};
use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct Logger {
    colors_enabled: bool,
}

impl Logger {
    fn prefix(&self, level: Level) -> ANSIString<'static> {
        let style = if self.colors_enabled {
            match level {
                Level::Error => Color::Red.bold(),
                Level::Warn => Color::Yellow.bold(),
                _ => Color::Cyan.normal(),
            }
        } else {
            Style::new()
        };
        style.paint(format!("[{}]", level))
    }
}

impl Log for Logger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        eprintln!("{} {}", self.prefix(record.level()), record.args());
    }

    fn flush(&self) {}
}

pub fn init(max_level: LevelFilter) {
    let colors_enabled = std::env::var_os("NO_COLOR").is_none();
    log::set_boxed_logger(Box::new(Logger { colors_enabled })).expect("couldn't set up logger");
    log::set_max_level(max_level);
}
