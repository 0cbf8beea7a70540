//! Command-line options for the terminal runner.
//!
//! ```text
//! blockdrop [--seed N] [--width N] [--height N]
//! ```
//!
//! Without `--seed` the `BLOCKDROP_SEED` environment variable is used, then a
//! clock-derived seed.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};

use crate::core::GameConfig;

pub const SEED_ENV: &str = "BLOCKDROP_SEED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunArgs {
    pub seed: Option<u32>,
    pub width: Option<u8>,
    pub height: Option<u8>,
}

impl RunArgs {
    /// Default config with the board size overrides applied and validated.
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = GameConfig::default();
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        config.validate().context("invalid board size")?;
        Ok(config)
    }

    /// `--seed`, then the environment value, then the clock.
    pub fn resolve_seed(&self, env_value: Option<&str>) -> Result<u32> {
        if let Some(seed) = self.seed {
            return Ok(seed);
        }
        if let Some(v) = env_value {
            return v
                .trim()
                .parse::<u32>()
                .map_err(|_| anyhow!("invalid {} value: {}", SEED_ENV, v));
        }
        Ok(clock_seed())
    }
}

pub fn parse_run_args(args: &[String]) -> Result<RunArgs> {
    let mut out = RunArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--seed" => out.seed = Some(parse_value(args, &mut i, flag)?),
            "--width" => out.width = Some(parse_value(args, &mut i, flag)?),
            "--height" => out.height = Some(parse_value(args, &mut i, flag)?),
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(out)
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T> {
    *i += 1;
    let v = args
        .get(*i)
        .ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(1);
    // Fold the 128-bit count so low and high bits both contribute.
    (nanos ^ (nanos >> 32) ^ (nanos >> 64)) as u32
}
