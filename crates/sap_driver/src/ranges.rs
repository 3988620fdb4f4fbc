use std::ops::RangeInclusive;
use std::str::FromStr;

use sap_util::bail;

/// 1-based inclusive line selection, e.g. `3-10,14`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRanges {
    ranges: Vec<RangeInclusive<usize>>,
}

impl LineRanges {
    /// 0-based indices into a file of `line_count` lines, in order, deduped.
    /// Out-of-range selections are silently clipped.
    pub fn indices(&self, line_count: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .ranges
            .iter()
            .flat_map(|range| range.clone())
            .filter(|&line| line <= line_count)
            .map(|line| line - 1)
            .collect();

        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

impl FromStr for LineRanges {
    type Err = String;

    fn from_str(s: &str) -> Result<LineRanges, String> {
        let mut ranges = vec![];

        for part in s.split(',') {
            let part = part.trim();

            let (lo, hi) = match part.split_once('-') {
                Some((lo, hi)) => (parse_line(lo)?, parse_line(hi)?),
                None => {
                    let line = parse_line(part)?;
                    (line, line)
                }
            };

            if lo > hi {
                bail!(format!("backwards range `{}`", part));
            }

            ranges.push(lo..=hi);
        }

        Ok(LineRanges { ranges })
    }
}

fn parse_line(s: &str) -> Result<usize, String> {
    let line: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid line number `{}`", s))?;

    if line == 0 {
        bail!("line numbers are 1-based".to_string());
    }

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::LineRanges;

    fn parse(s: &str) -> LineRanges {
        s.parse().unwrap()
    }

    #[test]
    fn parses_singles_and_ranges() {
        assert_eq!(parse("3").indices(10), vec![2]);
        assert_eq!(parse("3-5,9").indices(10), vec![2, 3, 4, 8]);
        assert_eq!(parse("1-2, 2-3").indices(10), vec![0, 1, 2]);
    }

    #[test]
    fn clips_to_the_file() {
        assert_eq!(parse("8-12").indices(10), vec![7, 8, 9]);
        assert_eq!(parse("40").indices(10), Vec::<usize>::new());
    }

    #[test]
    fn rejects_nonsense() {
        assert!("0".parse::<LineRanges>().is_err());
        assert!("5-3".parse::<LineRanges>().is_err());
        assert!("a-b".parse::<LineRanges>().is_err());
        assert!("".parse::<LineRanges>().is_err());
    }
}
