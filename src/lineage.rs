//src/lineage.rs

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SintaxError};
use crate::rank::Rank;

/// Residual accession on species names, e.g. `Homo_sapiens_AB012345.1.1`.
static ACCESSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_[A-Z0-9]+\.[0-9]+\.[0-9]+$").expect("valid accession regex"));

/// Single-letter rank code, e.g. `g:` in `g:Escherichia`.
static RANK_CODE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]:").expect("valid rank code regex"));

const TAX_MARKER: &str = "tax=";

/// The seven positional lineage fields of one reference hit.
/// Labels still carry their rank-code prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineage {
    fields: [String; Rank::COUNT],
}

impl Lineage {
    pub fn get(&self, rank: Rank) -> &str {
        &self.fields[rank.index()]
    }

    pub fn fields(&self) -> &[String; Rank::COUNT] {
        &self.fields
    }
}

/// Parses `<prefix>;tax=<k>,<p>,<c>,<o>,<f>,<g>,<s>[;]` into a `Lineage`.
/// The first `;`-separated field is the reference id and is never searched.
///
/// Anything other than exactly seven fields is an error: voting is positional,
/// so padding or truncating would misalign ranks.
pub fn extract_lineage(asv_id: &str, annotation: &str) -> Result<Lineage> {
    let malformed = |reason: String| SintaxError::MalformedLineage {
        asv: asv_id.to_string(),
        annotation: annotation.to_string(),
        reason,
    };

    // The reference id before the first ';' may itself contain "tax="
    let tax = annotation
        .split(';')
        .skip(1)
        .find_map(|segment| segment.strip_prefix(TAX_MARKER))
        .ok_or_else(|| malformed(format!("missing ';{TAX_MARKER}' field")))?;

    let parts: Vec<&str> = tax.split(',').collect();
    if parts.len() != Rank::COUNT {
        return Err(malformed(format!(
            "expected {} tax fields, found {}",
            Rank::COUNT,
            parts.len()
        )));
    }

    let mut fields: [String; Rank::COUNT] = Default::default();
    for (slot, part) in fields.iter_mut().zip(parts) {
        *slot = part.to_string();
    }
    let species = &mut fields[Rank::Species.index()];
    *species = strip_accession_suffix(species);

    Ok(Lineage { fields })
}

/// Removes a trailing `_<ACCESSION>.<n>.<n>` from a species name.
pub fn strip_accession_suffix(species: &str) -> String {
    ACCESSION_SUFFIX.replace(species, "").into_owned()
}

/// Removes a leading single-letter rank code (`k:`, `g:`, `s:` ...).
pub fn strip_rank_code(label: &str) -> &str {
    match RANK_CODE_PREFIX.find(label) {
        Some(m) => &label[m.end()..],
        None => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNOTATION: &str = "AB000001.1.1;tax=k:Eukaryota,p:Chlorophyta,c:Mamiellophyceae,\
o:Mamiellales,f:Mamiellaceae,g:Micromonas,s:Micromonas_pusilla_AB183628.1.1751";

    #[test]
    fn test_extracts_seven_fields_in_rank_order() {
        let lineage = extract_lineage("A1", ANNOTATION).unwrap();
        assert_eq!(lineage.get(Rank::Kingdom), "k:Eukaryota");
        assert_eq!(lineage.get(Rank::Order), "o:Mamiellales");
        assert_eq!(lineage.get(Rank::Genus), "g:Micromonas");
        assert_eq!(lineage.get(Rank::Species), "s:Micromonas_pusilla");
    }

    #[test]
    fn test_trailing_semicolon_is_ignored() {
        let lineage = extract_lineage("A1", "ref;tax=k:A,p:B,c:C,o:D,f:E,g:F,s:G;").unwrap();
        assert_eq!(lineage.get(Rank::Species), "s:G");
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let lineage = extract_lineage("A1", "ref;tax=k:A,p:B,,,,,").unwrap();
        assert_eq!(lineage.get(Rank::Class), "");
        assert_eq!(lineage.get(Rank::Species), "");
    }

    #[test]
    fn test_too_few_fields_is_an_error() {
        let err = extract_lineage("A7", "ref;tax=k:A,p:B,c:C").unwrap_err();
        match err {
            SintaxError::MalformedLineage { asv, annotation, reason } => {
                assert_eq!(asv, "A7");
                assert_eq!(annotation, "ref;tax=k:A,p:B,c:C");
                assert!(reason.contains("found 3"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_too_many_fields_is_an_error() {
        let err = extract_lineage("A1", "ref;tax=k:A,p:B,c:C,o:D,f:E,g:F,s:G,x:H");
        assert!(matches!(err, Err(SintaxError::MalformedLineage { .. })));
    }

    #[test]
    fn test_tax_marker_inside_reference_id_is_skipped() {
        let lineage = extract_lineage("A1", "syntax=v2;tax=k:A,p:B,c:C,o:D,f:E,g:F,s:G").unwrap();
        assert_eq!(lineage.get(Rank::Kingdom), "k:A");
        assert_eq!(lineage.get(Rank::Species), "s:G");

        let lineage = extract_lineage("A1", "ref;size=3;tax=k:A,p:B,c:C,o:D,f:E,g:F,s:G;").unwrap();
        assert_eq!(lineage.get(Rank::Genus), "g:F");
    }

    #[test]
    fn test_tax_field_without_reference_id_is_an_error() {
        let err = extract_lineage("A1", "tax=k:A,p:B,c:C,o:D,f:E,g:F,s:G");
        assert!(matches!(err, Err(SintaxError::MalformedLineage { .. })));
    }

    #[test]
    fn test_missing_tax_marker_is_an_error() {
        let err = extract_lineage("A1", "ref;k:A,p:B,c:C,o:D,f:E,g:F,s:G");
        assert!(matches!(err, Err(SintaxError::MalformedLineage { .. })));
    }

    #[test]
    fn test_accession_suffix_only_stripped_at_end() {
        assert_eq!(strip_accession_suffix("s:Foo_bar_KX123.1.1"), "s:Foo_bar");
        assert_eq!(strip_accession_suffix("s:Foo_bar"), "s:Foo_bar");
        // lowercase block does not match
        assert_eq!(strip_accession_suffix("s:Foo_bar_kx123.1.1"), "s:Foo_bar_kx123.1.1");
        // a single version component does not match
        assert_eq!(strip_accession_suffix("s:Foo_bar_KX123.1"), "s:Foo_bar_KX123.1");
        assert_eq!(strip_accession_suffix("s:Foo_KX1.1.1_bar"), "s:Foo_KX1.1.1_bar");
    }

    #[test]
    fn test_accession_suffix_not_stripped_from_other_ranks() {
        let lineage =
            extract_lineage("A1", "ref;tax=k:A,p:B,c:C,o:D,f:E,g:Foo_KX1.1.1,s:Bar_KX1.1.1").unwrap();
        assert_eq!(lineage.get(Rank::Genus), "g:Foo_KX1.1.1");
        assert_eq!(lineage.get(Rank::Species), "s:Bar");
    }

    #[test]
    fn test_strip_rank_code() {
        assert_eq!(strip_rank_code("g:Foo"), "Foo");
        assert_eq!(strip_rank_code("d:Eukaryota"), "Eukaryota");
        assert_eq!(strip_rank_code("Foo"), "Foo");
        assert_eq!(strip_rank_code("Foo_g:bar"), "Foo_g:bar");
        assert_eq!(strip_rank_code(""), "");
    }
}
