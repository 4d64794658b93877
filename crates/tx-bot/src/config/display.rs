use crate::config::{BotConfig, KeySource};

impl BotConfig {
    pub fn print_safe_config(&self) -> String {
        let keys = match &self.keys {
            KeySource::Inline(keys) => format!("[{} key(s) REDACTED]", keys.len()),
            KeySource::File(path) => format!("file {path:?}"),
        };
        format!(
            r"
BotConfig {{
    logging_format: {:#?},
    rpc_url: {:#?},
    keys: {},
    files: {:#?},
    timings: {:#?},
    repeat_policy: {:#?},
    rng_seed: {:#?},
}}",
            self.logging_format,
            self.rpc_url,
            keys,
            self.files,
            self.timings,
            self.repeat_policy,
            self.rng_seed,
        )
    }
}
