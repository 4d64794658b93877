use std::str::FromStr;

use clap::ValueEnum;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum LoggingFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LoggingFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// What happens once a batch of transactions is finished.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum RepeatPolicy {
    /// Forget the chosen mode and count, then ask whether to run again in 24 hours.
    #[default]
    Confirm,
    /// Keep the chosen mode and count and run again after a short pause, without asking.
    Continuous,
}

impl FromStr for RepeatPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confirm" => Ok(Self::Confirm),
            "continuous" => Ok(Self::Continuous),
            _ => Err(()),
        }
    }
}
