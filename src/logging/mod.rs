use std::error;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io as std_io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use chrono::prelude::*;
pub use slog::FilterLevel as Level;
use slog::{Discard, Drain, Duplicate, Fuse, Level as LogLevel, LevelFilter, Logger, OwnedKV,
           SendSyncRefUnwindSafeKV};
use slog_async::Async;
use slog_term::{CompactFormat, Decorator, FullFormat, PlainDecorator, TermDecorator};

#[derive(Debug)]
pub enum Stream {
    StdOut,
    StdErr,
    File(File),
    Null,
}

impl Stream {
    pub fn is_null(&self) -> bool {
        match *self {
            Stream::Null => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Format {
    Full,
    Compact,
}

#[derive(Debug)]
pub struct LoggerBuilder {
    stream: Stream,
    level: Level,
    format: Format,
}

impl LoggerBuilder {
    pub fn new(stream: Stream) -> Self {
        LoggerBuilder {
            stream: stream,
            level: Level::Debug,
            format: Format::Full,
        }
    }

    pub fn level(mut self, l: Level) -> Self {
        self.level = l;
        self
    }

    pub fn format(mut self, f: Format) -> Self {
        self.format = f;
        self
    }

    pub fn build<T>(self, values: OwnedKV<T>) -> Logger
    where
        T: SendSyncRefUnwindSafeKV + 'static,
    {
        match self.build_drain() {
            Some(drain) => Logger::root(drain.fuse(), values),
            None => Logger::root(Discard, values),
        }
    }

    /// Builds a logger that writes to this stream and `other`'s stream.
    pub fn build_with<T>(self, other: LoggerBuilder, values: OwnedKV<T>) -> Logger
    where
        T: SendSyncRefUnwindSafeKV + 'static,
    {
        match (self.build_drain(), other.build_drain()) {
            (Some(d1), Some(d2)) => Logger::root(Duplicate::new(d1, d2).fuse(), values),
            (Some(d1), None) => Logger::root(d1.fuse(), values),
            (None, Some(d2)) => Logger::root(d2.fuse(), values),
            (None, None) => Logger::root(Discard, values),
        }
    }

    fn build_drain(&self) -> Option<LevelFilter<Fuse<Async>>> {
        match self.level {
            Level::Off => {
                return None;
            }
            _ => {}
        }
        match self.stream {
            Stream::StdOut => {
                Some(self.build_drain_from_decorator(TermDecorator::new().stdout().build()))
            }
            Stream::StdErr => {
                Some(self.build_drain_from_decorator(TermDecorator::new().stderr().build()))
            }
            Stream::File(ref f) => {
                match f.try_clone() {
                    Ok(f) => Some(self.build_drain_from_decorator(PlainDecorator::new(f))),
                    Err(_) => None,
                }
            }
            Stream::Null => None,
        }
    }

    fn build_drain_from_decorator<D: Decorator + Send + 'static>(
        &self,
        decorator: D,
    ) -> LevelFilter<Fuse<Async>> {
        let drain = match self.format {
            Format::Compact => {
                let drain = CompactFormat::new(decorator).use_local_timestamp().build();
                Async::new(drain.fuse()).build()
            }
            Format::Full => {
                let drain = FullFormat::new(decorator).use_local_timestamp().build();
                Async::new(drain.fuse()).build()
            }
        };
        LevelFilter::new(
            drain.fuse(),
            LogLevel::from_usize(self.level.as_usize()).unwrap(),
        )
    }
}

#[derive(Debug)]
pub enum Error {
    InvalidOption,
    Other(std_io::Error),
}

impl error::Error for Error {
    fn description(&self) -> &str {
        match *self {
            Error::InvalidOption => "invalid option",
            Error::Other(ref e) => e.description(),
        }
    }

    fn cause(&self) -> Option<&error::Error> {
        match *self {
            Error::InvalidOption => None,
            Error::Other(ref e) => e.cause(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidOption => "invalid option".fmt(f),
            Error::Other(ref err) => err.fmt(f),
        }
    }
}

/// File and terminal logging options.
///
/// `filename` is passed through `strftime` so that logs rotate daily by
/// default. `filemode` is `'a'` to append or `'w'` to truncate.
#[derive(Debug, Clone)]
pub struct Config {
    pub level: Level,
    pub verbosity: Level,
    pub logdir: String,
    pub mkdir: bool,
    pub filename: String,
    pub filemode: char,
    pub format: Format,
    pub use_stderr: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            level: Level::Debug,
            verbosity: Level::Trace,
            logdir: "./".to_string(),
            mkdir: false,
            filename: "%Y%m%d.log".to_string(),
            filemode: 'a',
            format: Format::Full,
            use_stderr: false,
        }
    }
}

pub fn create_logger<C: Into<Config>>(config: C) -> Result<Logger, Error> {
    create_logger_with_kv_and_time(config, o!(), Local::now())
}

pub fn create_logger_with_kv<C: Into<Config>, T>(
    config: C,
    values: OwnedKV<T>,
) -> Result<Logger, Error>
where
    T: SendSyncRefUnwindSafeKV + 'static,
{
    create_logger_with_kv_and_time(config, values, Local::now())
}

pub fn create_logger_with_kv_and_time<C: Into<Config>, T, Tz: TimeZone>(
    config: C,
    values: OwnedKV<T>,
    datetime: DateTime<Tz>,
) -> Result<Logger, Error>
where
    T: SendSyncRefUnwindSafeKV + 'static,
    Tz::Offset: fmt::Display,
{
    let c = config.into();
    let fstream = match c.level {
        Level::Off => Stream::Null,
        _ => {
            let mut options = OpenOptions::new();
            options.create(true).write(true);
            match c.filemode {
                'w' => {
                    options.truncate(true);
                }
                'a' => {
                    options.append(true);
                }
                _ => {
                    return Err(Error::InvalidOption);
                }
            }
            let path = resolve_filepath(&c.logdir, &c.filename, datetime, c.mkdir)
                .map_err(Error::Other)?;
            let file = options.open(path).map_err(Error::Other)?;
            Stream::File(file)
        }
    };

    let vstream = if c.use_stderr {
        Stream::StdErr
    } else {
        Stream::StdOut
    };
    let logger = LoggerBuilder::new(vstream)
        .level(c.verbosity)
        .format(c.format)
        .build_with(
            LoggerBuilder::new(fstream).level(c.level).format(c.format),
            values,
        );
    Ok(logger)
}

fn resolve_filepath<P1: AsRef<Path>, P2: AsRef<Path>, Tz: TimeZone>(
    dir: P1,
    filename: P2,
    time: DateTime<Tz>,
    mkdir: bool,
) -> Result<PathBuf, std_io::Error>
where
    Tz::Offset: fmt::Display,
{
    let dir = dir.as_ref();
    if dir.is_dir() {
        // pass
    } else if mkdir {
        fs::create_dir_all(dir)?;
    } else {
        return Err(std_io::Error::new(
            std_io::ErrorKind::NotFound,
            format!("`{}` is not a directory", dir.display()),
        ));
    }

    let filename = filename.as_ref();
    let raw = filename.to_str().ok_or_else(|| {
        std_io::Error::new(std_io::ErrorKind::InvalidInput, "invalid filename")
    })?;
    if raw.contains(MAIN_SEPARATOR) {
        return Err(std_io::Error::new(
            std_io::ErrorKind::InvalidInput,
            "filename must not contain the separator",
        ));
    }

    let stem = filename.file_stem().and_then(|s| s.to_str()).ok_or_else(
        || {
            std_io::Error::new(std_io::ErrorKind::InvalidInput, "invalid filename")
        },
    )?;
    let stem = format!("{}", time.format(stem));
    let ext = filename
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| format!(".{}", s))
        .unwrap_or_else(|| "".to_string());
    Ok(dir.join(format!("{}{}", stem, ext)))
}
