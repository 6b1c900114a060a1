use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use super::{scan_data_lines, ScanOptions};
use crate::config::{LiteralPolicy, ResourceExtraction};
use crate::error::Result;
use crate::indexing::{InstanceTypes, VertexSet};
use crate::parsing::clean_line;
use crate::sources::TripleSource;

/// Build the instance-type dictionary from an `instance_types` dump.
///
/// Each line maps its cleaned subject to its cleaned object. Dumps list some
/// resources more than once; a later type only wins over the generic
/// `owl#Thing`. With a vertex set, only its members are recorded and members
/// missing from the dump are added with the generic type.
pub fn generate_instance_types<I>(
    lines: I,
    vertex_set: Option<&VertexSet>,
    options: ScanOptions,
) -> Result<InstanceTypes>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut types = InstanceTypes::new();
    scan_data_lines(lines, options, |line_number, line| {
        let Some(triple) =
            clean_line(line, LiteralPolicy::Ignore, ResourceExtraction::StripDbpediaPrefix)
        else {
            warn!(line_number, "skipping malformed triple");
            return;
        };
        if triple.subject.is_empty() || triple.object.is_empty() {
            return;
        }
        if vertex_set.map_or(true, |vertices| vertices.contains(&triple.subject)) {
            types.record(&triple.subject, &triple.object);
        }
    })?;

    if let Some(vertices) = vertex_set {
        types.merge_vertex_set(vertices);
    }
    Ok(types)
}

/// Build the instance-type dictionary of `input` and store it at `output`.
pub fn build_instance_types(
    input: &Path,
    output: &Path,
    vertex_set: Option<&Path>,
    options: ScanOptions,
) -> Result<InstanceTypes> {
    info!(input = %input.display(), output = %output.display(), "building instance dictionary");
    let started = Instant::now();

    let vertices = vertex_set.map(VertexSet::load_from_file).transpose()?;
    let types =
        generate_instance_types(TripleSource::open(input)?.lines(), vertices.as_ref(), options)?;
    types.save_to_file(output)?;

    info!(
        entries = types.len(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        "instance dictionary done"
    );
    Ok(types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_INSTANCE_TYPE;

    const RDF_TYPE: &str = "<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>";

    fn typed(name: &str, type_uri: &str) -> String {
        format!("<http://dbpedia.org/resource/{}> {} <{}> .\n", name, RDF_TYPE, type_uri)
    }

    fn lines(data: Vec<String>) -> Vec<Result<String>> {
        std::iter::once("# started\n".to_string()).chain(data).map(Ok).collect()
    }

    #[test]
    fn test_types_recorded() {
        let data = lines(vec![
            typed("Alan_Turing", "http://dbpedia.org/ontology/Scientist"),
            typed("London", "http://www.w3.org/2002/07/owl#Thing"),
            typed("London", "http://dbpedia.org/ontology/City"),
            typed("London", "http://dbpedia.org/ontology/Place"),
        ]);
        let types = generate_instance_types(data, None, ScanOptions::default()).unwrap();
        assert_eq!(types.type_of("Alan_Turing"), "Scientist");
        assert_eq!(types.type_of("London"), "City");
        assert_eq!(types.len(), 2);
    }

    #[test]
    fn test_vertex_set_filters_and_fills() {
        let data = lines(vec![
            typed("Alan_Turing", "http://dbpedia.org/ontology/Scientist"),
            typed("Paris", "http://dbpedia.org/ontology/City"),
        ]);
        let vertices: VertexSet = ["Alan_Turing", "London"].into_iter().collect();
        let types =
            generate_instance_types(data, Some(&vertices), ScanOptions::default()).unwrap();

        assert_eq!(types.type_of("Alan_Turing"), "Scientist");
        assert!(types.contains("London"));
        assert_eq!(types.type_of("London"), DEFAULT_INSTANCE_TYPE);
        assert!(!types.contains("Paris"));
    }

    #[test]
    fn test_build_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("instance_types_en.ttl");
        let contents: String = lines(vec![typed("A", "http://dbpedia.org/ontology/Person")])
            .into_iter()
            .map(|line| line.unwrap())
            .collect();
        std::fs::write(&input, contents).unwrap();

        let output = dir.path().join("instance_types.bin");
        let built = build_instance_types(&input, &output, None, ScanOptions::default()).unwrap();
        assert_eq!(InstanceTypes::load_from_file(&output).unwrap(), built);
        assert_eq!(built.type_of("A"), "Person");
    }
}
