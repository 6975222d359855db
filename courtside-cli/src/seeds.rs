use anyhow::{Context, Result, bail};
use std::collections::HashSet;

const DEFAULT_SEED: u64 = 1337;
const MAX_RANGE_LEN: u64 = 100_000;

/// Resolve CLI seed tokens into an ordered, de-duplicated seed list.
///
/// Supports literal integers (negative values use their magnitude),
/// half-open ranges `a..b` and inclusive ranges `a..=b`.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();

    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        for seed in expand_token(token)? {
            if seen.insert(seed) {
                seeds.push(seed);
            }
        }
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }
    Ok(seeds)
}

fn expand_token(token: &str) -> Result<Vec<u64>> {
    if let Some((start, end)) = token.split_once("..") {
        let (end, inclusive) = end
            .strip_prefix('=')
            .map_or((end, false), |rest| (rest, true));
        let start = parse_bound(start, token)?;
        let end = parse_bound(end, token)?;
        let end = if inclusive { end.saturating_add(1) } else { end };
        if end <= start {
            bail!("Empty seed range: {token}");
        }
        if end - start > MAX_RANGE_LEN {
            bail!("Seed range {token} is larger than {MAX_RANGE_LEN} seeds");
        }
        return Ok((start..end).collect());
    }

    if let Ok(value) = token.parse::<i64>() {
        return Ok(vec![value.unsigned_abs()]);
    }
    if let Ok(value) = token.parse::<u64>() {
        return Ok(vec![value]);
    }
    bail!("Unrecognized seed token: {token}");
}

fn parse_bound(raw: &str, token: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("invalid seed range bound in {token}"))
}
