use std::{fmt, str::FromStr};

/// Which recipient list a batch of transactions draws from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RecipientMode {
    Burn,
    Kyc,
}

impl FromStr for RecipientMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Burn),
            "2" => Ok(Self::Kyc),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RecipientMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Burn => write!(f, "burn addresses"),
            Self::Kyc => write!(f, "KYC addresses"),
        }
    }
}

/// What a batch of transactions should do.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RunPlan {
    pub mode: RecipientMode,
    pub count: u32,
}

/// Carried between consecutive batches. Without a plan the operator is asked for one.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RunState {
    pub plan: Option<RunPlan>,
}

impl RunState {
    pub fn with_plan(mode: RecipientMode, count: u32) -> Self {
        Self {
            plan: Some(RunPlan { mode, count }),
        }
    }
}
