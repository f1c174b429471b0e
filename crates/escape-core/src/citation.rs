//! Citation strings with duplicate-suffix disambiguation.
//!
//! Studies sharing first author, year, and journal would otherwise get the
//! same citation. Within such a group each study receives a letter suffix in
//! registry order (`a` for the first, `b` for the second, ...). A study alone
//! in its group gets no suffix.

use std::collections::BTreeMap;

use escape_model::{CitationEntry, EscapeError, Result, Study};

const SUFFIX_LETTERS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

type GroupKey<'a> = (&'a str, i64, &'a str);

fn group_key(study: &Study) -> GroupKey<'_> {
    (study.first_author.as_str(), study.year, study.journal.as_str())
}

/// Builds one citation per study, in registry order.
///
/// # Errors
///
/// [`EscapeError::CitationOverflow`] if more than 26 studies share a group.
pub fn build_citations(studies: &[Study]) -> Result<Vec<CitationEntry>> {
    let mut group_sizes: BTreeMap<GroupKey<'_>, usize> = BTreeMap::new();
    for study in studies {
        *group_sizes.entry(group_key(study)).or_insert(0) += 1;
    }

    let mut seen: BTreeMap<GroupKey<'_>, usize> = BTreeMap::new();
    let mut entries = Vec::with_capacity(studies.len());
    for study in studies {
        let key = group_key(study);
        let size = group_sizes.get(&key).copied().unwrap_or(0);
        let occurrence = seen.entry(key).or_insert(0);
        let suffix = if size < 2 {
            String::new()
        } else {
            let letter = SUFFIX_LETTERS
                .get(*occurrence)
                .ok_or_else(|| EscapeError::CitationOverflow {
                    citation: study.base_citation(),
                    count: size,
                })?;
            char::from(*letter).to_string()
        };
        *occurrence += 1;
        entries.push(CitationEntry {
            study: study.id.clone(),
            citation: study.citation_with_suffix(&suffix),
            url: study.url.clone(),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape_model::ErrorKind;

    fn study(id: &str, author: &str, year: i64, journal: &str) -> Study {
        Study {
            id: id.to_string(),
            first_author: author.to_string(),
            year,
            journal: journal.to_string(),
            url: format!("https://example.org/{id}"),
        }
    }

    #[test]
    fn test_shared_triple_gets_suffixes() {
        let citations = build_citations(&[
            study("2021_Smith_A", "Smith", 2021, "Nature"),
            study("2021_Smith_B", "Smith", 2021, "Nature"),
        ])
        .unwrap();
        assert_eq!(citations[0].citation, "Smith et al. Nature (2021a)");
        assert_eq!(citations[1].citation, "Smith et al. Nature (2021b)");
        assert_eq!(citations[1].url, "https://example.org/2021_Smith_B");
    }

    #[test]
    fn test_lone_studies_have_no_suffix() {
        let citations = build_citations(&[
            study("2021_Smith_A", "Smith", 2021, "Nature"),
            study("2021_Smith_B", "Smith", 2021, "Science"),
            study("2020_Smith_C", "Smith", 2020, "Nature"),
        ])
        .unwrap();
        let strings: Vec<&str> = citations.iter().map(|c| c.citation.as_str()).collect();
        assert_eq!(
            strings,
            vec![
                "Smith et al. Nature (2021)",
                "Smith et al. Science (2021)",
                "Smith et al. Nature (2020)",
            ]
        );
    }

    #[test]
    fn test_interleaved_groups_keep_registry_order() {
        let citations = build_citations(&[
            study("s1", "Starr", 2021, "Science"),
            study("s2", "Greaney", 2021, "Cell"),
            study("s3", "Starr", 2021, "Science"),
            study("s4", "Greaney", 2021, "Cell"),
            study("s5", "Starr", 2021, "Science"),
        ])
        .unwrap();
        let strings: Vec<(&str, &str)> = citations
            .iter()
            .map(|c| (c.study.as_str(), c.citation.as_str()))
            .collect();
        assert_eq!(
            strings,
            vec![
                ("s1", "Starr et al. Science (2021a)"),
                ("s2", "Greaney et al. Cell (2021a)"),
                ("s3", "Starr et al. Science (2021b)"),
                ("s4", "Greaney et al. Cell (2021b)"),
                ("s5", "Starr et al. Science (2021c)"),
            ]
        );
    }

    #[test]
    fn test_more_than_26_fails() {
        let studies: Vec<Study> = (0..27)
            .map(|i| study(&format!("2021_Smith_{i}"), "Smith", 2021, "Nature"))
            .collect();
        let err = build_citations(&studies).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CitationOverflow);

        let citations = build_citations(&studies[..26]).unwrap();
        assert_eq!(citations[25].citation, "Smith et al. Nature (2021z)");
    }
}
