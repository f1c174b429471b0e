//! In-memory CSV rendering of the merged tables.

use csv::WriterBuilder;

use escape_model::{CITATION_OUTPUT_COLUMNS, CitationEntry, ESCAPE_OUTPUT_COLUMNS, EnrichedRow};

use crate::format::format_escape_value;

/// Renders the merged escape table, header first, in row order.
pub fn render_escape_table(rows: &[EnrichedRow]) -> csv::Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(ESCAPE_OUTPUT_COLUMNS)?;
    for row in rows {
        let year = row.descriptor.year.to_string();
        let escape = format_escape_value(row.measurement.mut_escape);
        writer.write_record([
            row.measurement.condition.as_str(),
            row.descriptor.condition_type.as_str(),
            row.descriptor.subtype.as_str(),
            year.as_str(),
            row.measurement.site.as_str(),
            row.measurement.wildtype.as_str(),
            row.measurement.mutation.as_str(),
            escape.as_str(),
            row.study.as_str(),
        ])?;
    }
    finish(writer)
}

/// Renders the study citation index.
pub fn render_citation_table(citations: &[CitationEntry]) -> csv::Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(CITATION_OUTPUT_COLUMNS)?;
    for entry in citations {
        writer.write_record([
            entry.study.as_str(),
            entry.citation.as_str(),
            entry.url.as_str(),
        ])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> csv::Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape_model::{ConditionDescriptor, ConditionSubtype, ConditionType, MeasurementRow};

    fn row(condition: &str, site: &str, mut_escape: Option<f64>, study: &str) -> EnrichedRow {
        EnrichedRow {
            descriptor: ConditionDescriptor {
                condition_type: ConditionType::Serum,
                subtype: ConditionSubtype::ModernaVaccineSerum,
                year: 2021,
            },
            measurement: MeasurementRow {
                condition: condition.to_string(),
                site: site.to_string(),
                wildtype: "E".to_string(),
                mutation: "K".to_string(),
                mut_escape,
            },
            study: study.to_string(),
        }
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_empty_escape_table_has_header() {
        let rendered = text(render_escape_table(&[]).unwrap());
        assert_eq!(rendered, format!("{}\n", ESCAPE_OUTPUT_COLUMNS.join(",")));
    }

    #[test]
    fn test_escape_rows_render_in_order() {
        let rendered = text(
            render_escape_table(&[
                row("M1", "484", Some(0.812345), "2021_Greaney_mRNA"),
                row("M1", "486", None, "2021_Greaney_mRNA"),
            ])
            .unwrap(),
        );
        insta::assert_snapshot!(rendered, @r"
        condition,condition_type,condition_subtype,condition_year,site,wildtype,mutation,mut_escape,study
        M1,serum,Moderna vaccine serum,2021,484,E,K,0.8123,2021_Greaney_mRNA
        M1,serum,Moderna vaccine serum,2021,486,E,K,,2021_Greaney_mRNA
        ");
    }

    #[test]
    fn test_citation_with_comma_is_quoted() {
        let rendered = text(
            render_citation_table(&[CitationEntry {
                study: "2021_Starr_RBD".to_string(),
                citation: "Starr et al. Science, Reports (2021)".to_string(),
                url: "https://example.org/starr".to_string(),
            }])
            .unwrap(),
        );
        insta::assert_snapshot!(rendered, @r#"
        study,citation,url
        2021_Starr_RBD,"Starr et al. Science, Reports (2021)",https://example.org/starr
        "#);
    }
}
