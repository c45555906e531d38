use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use bookshelf_stats::report::{basic_report, summary_report};
use bookshelf_stats::{Design, DesignStats, FieldKind, ParseError, ParseOptions};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const NODES: &str = "UCLA nodes 1.0\n\
# Created by hand\n\
\n\
NumNodes : 5\n\
NumTerminals : 1\n\
  o0  4  10\n\
  o1  6  10\n\
  o2  2  10\n\
  o3  8  10\n\
  p0  20 20 terminal\n";

const PL: &str = "UCLA pl 1.0\n\
\n\
o0 0 0 : N\n\
o1 4 0 : FS\n\
o2 10 10 : N /FIXED\n\
o3 12 10 : N\n\
p0 100 100 : N /FIXED\n";

const NETS: &str = "UCLA nets 1.0\n\
NumNets : 3\n\
NumPins : 7\n\
NetDegree : 2 n0\n\
  o0 O : 1.0 2.0\n\
  o1 I : -1 0\n\
NetDegree : 3\n\
  o1 O\n\
  o2 I : 0 0\n\
  p0 I : 0.5 0.5\n\
NetDegree : 2 n2\n\
  o3 B : 0 0\n\
  o0 I : 0 0\n";

const SCL: &str = "UCLA scl 1.0\n\
NumRows : 2\n\
CoreRow Horizontal\n\
  Coordinate    :  0\n\
  Height        :  10\n\
  Sitewidth     :  1\n\
  Sitespacing   :  1\n\
  Siteorient    :  1\n\
  Sitesymmetry  :  1\n\
  SubrowOrigin  :  0  NumSites  :  40\n\
End\n\
CoreRow Horizontal\n\
  Coordinate    :  10\n\
  Height        :  10\n\
  Sitewidth     :  1\n\
  Sitespacing   :  1\n\
  Siteorient    :  1\n\
  Sitesymmetry  :  1\n\
  SubrowOrigin  :  0  NumSites  :  40\n\
End\n";

fn write_design(dir: &Path, name: &str, scl: &str) {
    fs::write(dir.join(format!("{}.nodes", name)), NODES).unwrap();
    fs::write(dir.join(format!("{}.pl", name)), PL).unwrap();
    fs::write(dir.join(format!("{}.nets", name)), NETS).unwrap();
    fs::write(dir.join(format!("{}.scl", name)), scl).unwrap();
}

#[test]
fn summary_for_small_design() {
    init();
    let dir = tempfile::tempdir().unwrap();
    write_design(dir.path(), "tiny", SCL);

    let design = Design::read(dir.path(), "tiny", &ParseOptions::default()).unwrap();
    assert_eq!(design.nodes.len(), 5);
    assert_eq!(design.nets.len(), 3);
    assert_eq!(design.nets.iter().nth(1).unwrap().name, "_net1");
    assert!(design.wts.is_empty());

    let stats = DesignStats::compute(&design);
    // Core is 40 x 20.  o2 is fixed in core; p0 is fixed outside it.
    assert_eq!(stats.areas.core_area, 800);
    assert_eq!(stats.areas.movable_area, 180);
    assert_eq!(stats.areas.fixed_area, 420);
    assert_eq!(stats.areas.fixed_in_core, 20);
    assert_eq!(stats.degrees.average_degree(), 7.0 / 3.0);

    let expected = "\
Use BOOKSHELF placement format
Reading AUX file: tiny/tiny.aux tiny.nodes tiny.nets tiny.wts tiny.pl tiny.scl
Set core region from site info: lower left: (0,0) to upper right: (40,20)
NumModules: 5
NumNodes: 4 (= 0k)
Terminals: 1
Nets: 3
Pins: 7
Max net degree= 3
Initialize module position with file: tiny.pl
<<<< DATABASE SUMMARIES >>>>
Core region: lower left: (0,0) to upper right: (40,20)
Row Height/Number: 10 / 2 (site step 1.000000)
Core Area: 800 (8.000000E+02)
Cell Area: 180 (1.800000E+02)
Movable Area: 180 (1.800000E+02)
Fixed Area: 420 (4.200000E+02)
Fixed Area in Core: 20 (2.000000E+01)
Placement Util.: 23.08% (=move/freeSites)
Core Density: 25.00% (=usedArea/core)
Cell #: 4 (=0k)
Object #: 5 (=0k) (fixed: 1) (macro: 0)
Net #: 3 (=0k)
Max net degree=: 3
Pin 2 (2) 3-10 (1) 11-100 (0) 100- (0)
Pin #: 7
";
    assert_eq!(summary_report(&design, &stats), expected);

    assert_eq!(
        basic_report(&design),
        "---- DESIGN tiny ----\n\
         Design has 5 nodes (1 terminals), 3 nets, 2 rows\n\
         5 placements, 7 pins, 0 weights\n\
         Nodes without placement: 0\n\
         Pins on unknown nodes: 0\n\
         Unconnected nodes: 0\n"
    );
}

#[test]
fn design_named_by_aux_file() {
    init();
    let dir = tempfile::tempdir().unwrap();
    write_design(dir.path(), "tiny", SCL);
    fs::write(dir.path().join("tiny.wts"), "UCLA wts 1.0\nn0 2\n").unwrap();
    let aux = dir.path().join("tiny.aux");
    fs::write(
        &aux,
        "RowBasedPlacement : tiny.nodes tiny.nets tiny.wts tiny.pl tiny.scl\n",
    )
    .unwrap();

    let design = Design::read_aux(&aux, &ParseOptions::default()).unwrap();
    assert_eq!(design.name, "tiny");
    assert_eq!(design.files.aux.as_deref(), Some(aux.as_path()));
    assert_eq!(design.wts.get("n0"), Some(2.0));
    assert_eq!(design.scl.rows.len(), 2);
}

#[test]
fn missing_required_file() {
    init();
    let dir = tempfile::tempdir().unwrap();
    write_design(dir.path(), "tiny", SCL);
    fs::remove_file(dir.path().join("tiny.pl")).unwrap();

    match Design::read(dir.path(), "tiny", &ParseOptions::default()) {
        Err(ParseError::FileNotFound { path, .. }) => assert_eq!(path, dir.path().join("tiny.pl")),
        other => panic!("expected FileNotFound, got {:?}", other.map(|d| d.name)),
    }
}

#[test]
fn bad_row_attribute_is_fatal_unless_lenient() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let scl = SCL.replacen("Height        :  10", "Height        :  ten", 1);
    write_design(dir.path(), "tiny", &scl);

    match Design::read(dir.path(), "tiny", &ParseOptions::default()) {
        Err(ParseError::MalformedNumericField { path, field, token, .. }) => {
            assert_eq!(path, dir.path().join("tiny.scl"));
            assert_eq!(field, FieldKind::RowAttribute);
            assert_eq!(token, "ten");
        }
        other => panic!("expected a malformed row, got {:?}", other.map(|d| d.name)),
    }

    let design = Design::read(dir.path(), "tiny", &ParseOptions::lenient()).unwrap();
    assert_eq!(design.scl.rows.len(), 2);
}

#[test]
fn latin1_comment_is_not_fatal() {
    init();
    let dir = tempfile::tempdir().unwrap();
    write_design(dir.path(), "tiny", SCL);
    let mut nodes = b"UCLA nodes 1.0\n# Created by Jos\xe9\n".to_vec();
    nodes.extend_from_slice(NODES.trim_start_matches("UCLA nodes 1.0\n").as_bytes());
    fs::write(dir.path().join("tiny.nodes"), nodes).unwrap();

    let design = Design::read(dir.path(), "tiny", &ParseOptions::default()).unwrap();
    assert_eq!(design.nodes.len(), 5);
    assert_eq!(design.nodes.num_terminals(), 1);
}
