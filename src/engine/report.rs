//! Result listing: the query histogram, then the retained matches in list order.

use anyhow::Result;
use std::io::Write;

use crate::engine::tools::format_bins;
use crate::{JsonReport, SearchOutcome};

/// Text report. `top_k` is the configured K, printed even when fewer matches were found.
pub fn write_report<W: Write>(w: &mut W, outcome: &SearchOutcome, top_k: usize) -> Result<()> {
    writeln!(
        w,
        "Histogram of the query image: {}",
        format_bins(&outcome.query.bins)
    )?;
    writeln!(w, "The {} most similar images:", top_k)?;
    for (i, m) in outcome.matches.iter().enumerate() {
        writeln!(w, "{}: {}", i + 1, m.histogram.name.display())?;
    }
    Ok(())
}

pub fn write_json_report<W: Write>(w: &mut W, outcome: &SearchOutcome) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, &JsonReport::from(outcome))?;
    writeln!(w)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Histogram, Match};
    use std::path::PathBuf;

    fn outcome() -> SearchOutcome {
        let h = |name: &str, bins: Vec<u64>| Histogram {
            name: PathBuf::from(name),
            bins,
        };
        SearchOutcome {
            query: h("q.jpg", vec![3, 0, 1]),
            matches: vec![
                Match {
                    histogram: h("data/b.jpg", vec![3, 0, 0]),
                    distance: 3,
                },
                Match {
                    histogram: h("data/a.jpg", vec![0, 0, 1]),
                    distance: 1,
                },
            ],
            skipped: vec![(PathBuf::from("data/bad.jpg"), "truncated".to_string())],
        }
    }

    #[test]
    fn text_report_format() {
        let mut out = Vec::new();
        write_report(&mut out, &outcome(), 5).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Histogram of the query image: [3 0 1]\n\
             The 5 most similar images:\n\
             1: data/b.jpg\n\
             2: data/a.jpg\n"
        );
    }

    #[test]
    fn empty_dataset_prints_only_headers() {
        let mut o = outcome();
        o.matches.clear();
        let mut out = Vec::new();
        write_report(&mut out, &o, 5).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Histogram of the query image: [3 0 1]\nThe 5 most similar images:\n"
        );
    }

    #[test]
    fn json_report_has_ranks_and_skipped() {
        let mut out = Vec::new();
        write_json_report(&mut out, &outcome()).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["query"], "q.jpg");
        assert_eq!(v["histogram"], serde_json::json!([3, 0, 1]));
        assert_eq!(v["matches"][0]["rank"], 1);
        assert_eq!(v["matches"][0]["path"], "data/b.jpg");
        assert_eq!(v["matches"][1]["distance"], 1);
        assert_eq!(v["skipped"][0]["reason"], "truncated");
    }
}
