use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::location::{GeoPoint, Location};

/// One directed road segment as written in a map file.
#[derive(Debug, Clone, PartialEq)]
struct Segment {
    from: GeoPoint,
    to: GeoPoint,
    road_name: String,
    road_class: String,
}

/// Load a road map file from disk.
///
/// See [`parse_road_map`] for the format.
pub fn load_road_map(path: &Path) -> Result<Graph<GeoPoint>> {
    let file = File::open(path)?;
    let graph = parse_road_map(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        vertices = graph.num_vertices(),
        edges = graph.num_edges(),
        "loaded road map"
    );
    Ok(graph)
}

/// Parse a road map from text.
///
/// Each non-blank line that does not start with `#` describes one directed
/// segment:
///
/// ```text
/// <lat1> <lon1> <lat2> <lon2> "<road name>" <road class>
/// ```
///
/// Both endpoints become vertices and the edge length is the great-circle
/// distance between them. Two-way roads are written as two lines.
pub fn parse_road_map<R: BufRead>(reader: R) -> Result<Graph<GeoPoint>> {
    let mut graph = Graph::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let number = index + 1;
        let segment = parse_segment(trimmed).map_err(|message| Error::MapParse {
            line: number,
            message,
        })?;

        graph.add_vertex(segment.from);
        graph.add_vertex(segment.to);
        let length = segment.from.distance(&segment.to);
        graph.add_edge(
            &segment.from,
            &segment.to,
            segment.road_name,
            segment.road_class.as_str(),
            length,
        )?;
    }

    Ok(graph)
}

fn parse_segment(line: &str) -> std::result::Result<Segment, String> {
    let open = line
        .find('"')
        .ok_or_else(|| "missing quoted road name".to_string())?;
    let close = line[open + 1..]
        .find('"')
        .map(|offset| open + 1 + offset)
        .ok_or_else(|| "unterminated road name".to_string())?;

    let coordinates = line[..open]
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| format!("invalid coordinate '{token}'"))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let &[lat1, lon1, lat2, lon2] = coordinates.as_slice() else {
        return Err(format!(
            "expected 4 coordinates before the road name, found {}",
            coordinates.len()
        ));
    };

    let mut rest = line[close + 1..].split_whitespace();
    let road_class = rest
        .next()
        .ok_or_else(|| "missing road class".to_string())?;
    if let Some(extra) = rest.next() {
        return Err(format!("unexpected trailing text '{extra}'"));
    }
    let road_class = unquote_class(road_class)?;

    Ok(Segment {
        from: GeoPoint::new(lat1, lon1),
        to: GeoPoint::new(lat2, lon2),
        road_name: line[open + 1..close].to_string(),
        road_class: road_class.to_string(),
    })
}

// Classes may be written bare or quoted like the road name.
fn unquote_class(class: &str) -> std::result::Result<&str, String> {
    if !class.contains('"') {
        return Ok(class);
    }
    class
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .filter(|inner| !inner.is_empty() && !inner.contains('"'))
        .ok_or_else(|| format!("malformed road class '{class}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_segment() {
        let segment =
            parse_segment(r#"32.8 -117.2 32.9 -117.3 "Gilman Dr" residential"#).unwrap();
        assert_eq!(segment.from, GeoPoint::new(32.8, -117.2));
        assert_eq!(segment.to, GeoPoint::new(32.9, -117.3));
        assert_eq!(segment.road_name, "Gilman Dr");
        assert_eq!(segment.road_class, "residential");
    }

    #[test]
    fn empty_road_names_are_allowed() {
        let segment = parse_segment(r#"1 1 2 2 "" track"#).unwrap();
        assert_eq!(segment.road_name, "");
    }

    #[test]
    fn quoted_road_class_is_unquoted() {
        let segment = parse_segment(r#"1 1 2 2 "Main" "motorway""#).unwrap();
        assert_eq!(segment.road_class, "motorway");
    }

    #[test]
    fn malformed_segments_are_described() {
        let cases = [
            ("1 1 2 2 Main residential", "missing quoted road name"),
            (r#"1 1 2 2 "Main residential"#, "unterminated road name"),
            (r#"1 1 2 "Main" residential"#, "expected 4 coordinates"),
            (r#"1 x 2 2 "Main" residential"#, "invalid coordinate 'x'"),
            (r#"1 1 2 2 "Main""#, "missing road class"),
            (r#"1 1 2 2 "Main" residential extra"#, "unexpected trailing text"),
            (r#"1 1 2 2 "Main" "motorway"#, "malformed road class"),
            (r#"1 1 2 2 "Main" ""#, "malformed road class"),
        ];
        for (line, expected) in cases {
            let message = parse_segment(line).unwrap_err();
            assert!(message.contains(expected), "{line}: {message}");
        }
    }
}
