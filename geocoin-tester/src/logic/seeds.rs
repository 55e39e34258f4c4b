use anyhow::{Context, Result, bail};

/// Parse CLI seed tokens.
///
/// Accepts decimal integers (negative values use their magnitude) and
/// `0x`-prefixed hex. Empty tokens are skipped; duplicates are dropped.
pub fn resolve_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let seed = if let Some(hex) = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            u64::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed {token:?}"))?
        } else if let Ok(value) = token.parse::<i64>() {
            value.unsigned_abs()
        } else {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed {token:?}"))?
        };
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    if seeds.is_empty() {
        bail!("no seeds given");
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn mixed_forms_resolve() {
        let seeds = resolve_seeds(&tokens(&["1337", "-5", "0xff", "", "1337"])).unwrap();
        assert_eq!(seeds, vec![1337, 5, 255]);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = resolve_seeds(&tokens(&["seven"])).unwrap_err();
        assert!(err.to_string().contains("invalid seed"));
        assert!(resolve_seeds(&tokens(&["", " "])).is_err());
    }
}
