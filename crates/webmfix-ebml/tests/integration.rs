//! Integration tests for webmfix-ebml

use webmfix_ebml::{
    codec, fix_webm_duration, registry::ids, serializer, vint, Container, ElementKind,
    FixOutcome, WebmFile, DEFAULT_MIME_TYPE, TIMECODE_SCALE_MS,
};

/// Unregistered element ID used to check pass-through.
const UNREGISTERED: u64 = 0x3cb923;

fn element(id: u64, content: &[u8]) -> Vec<u8> {
    let mut out = vint::encode(id).unwrap().to_vec();
    out.extend_from_slice(&vint::encode(content.len() as u64).unwrap());
    out.extend_from_slice(content);
    out
}

fn uint(id: u64, value: u64) -> Vec<u8> {
    element(id, &codec::encode_uint(value))
}

fn float32(id: u64, value: f32) -> Vec<u8> {
    element(id, &value.to_be_bytes())
}

fn float64(id: u64, value: f64) -> Vec<u8> {
    element(id, &value.to_be_bytes())
}

fn ebml_header() -> Vec<u8> {
    element(
        ids::EBML,
        &[
            uint(ids::EBML_VERSION, 1),
            uint(ids::EBML_READ_VERSION, 1),
            element(ids::DOC_TYPE, b"webm"),
            uint(ids::DOC_TYPE_VERSION, 4),
        ]
        .concat(),
    )
}

fn segment_body(info_children: &[u8]) -> Vec<u8> {
    let tracks = element(
        ids::TRACKS,
        &element(
            ids::TRACK_ENTRY,
            &[
                uint(ids::TRACK_NUMBER, 1),
                element(ids::CODEC_ID, b"A_OPUS"),
                element(ids::AUDIO, &float64(ids::SAMPLING_FREQUENCY, 48000.0)),
            ]
            .concat(),
        ),
    );
    // Timecode + one SimpleBlock, never interpreted
    let cluster = element(
        ids::CLUSTER,
        &[0xE7, 0x81, 0x00, 0xA3, 0x84, 0x81, 0x00, 0x00, 0x80],
    );

    [element(ids::INFO, info_children), tracks, cluster].concat()
}

/// Info children: TimecodeScale followed by `rest`.
fn info_children(scale: u64, rest: &[Vec<u8>]) -> Vec<u8> {
    let mut out = uint(ids::TIMECODE_SCALE, scale);
    for part in rest {
        out.extend_from_slice(part);
    }
    out
}

/// EBML header followed by a Segment whose Info holds `info_children`.
fn recording(info_children: &[u8]) -> Vec<u8> {
    [ebml_header(), element(ids::SEGMENT, &segment_body(info_children))].concat()
}

fn info(file: &WebmFile) -> &Container {
    file.root()
        .container(ids::SEGMENT)
        .and_then(|segment| segment.container(ids::INFO))
        .expect("Segment/Info present")
}

#[test]
fn test_round_trip_identity() {
    let input = recording(
        &[
            uint(ids::TIMECODE_SCALE, 1_000_000),
            element(ids::MUXING_APP, b"Chrome"),
            element(ids::WRITING_APP, b"Chrome"),
        ]
        .concat(),
    );
    let file = WebmFile::new(input.clone());

    assert_eq!(&file.to_bytes()[..], &input[..]);
    assert_eq!(
        &serializer::serialize(file.root().children()).unwrap()[..],
        &input[..]
    );

    let segment = file.root().container(ids::SEGMENT).unwrap();
    assert_eq!(&serializer::serialize(segment.children()).unwrap(), segment.raw());
}

#[test]
fn test_end_to_end_zero_scale_and_duration() {
    let input = recording(&info_children(0, &[float64(ids::DURATION, 0.0)]));
    let mut file = WebmFile::new(input.clone());

    assert!(file.fix_duration(5000.0).unwrap());

    let output = file.to_blob().into_bytes();
    let reparsed = WebmFile::new(output.clone());
    assert_eq!(reparsed.timecode_scale(), Some(TIMECODE_SCALE_MS));
    assert_eq!(reparsed.duration(), Some(5000.0));

    // Scale grew from 1 to 3 bytes; every size on the path was recomputed
    assert_eq!(output.len(), input.len() + 2);
    assert_eq!(
        &serializer::serialize(reparsed.root().children()).unwrap(),
        &output
    );
    let segment = reparsed.root().container(ids::SEGMENT).unwrap();
    assert_eq!(&serializer::serialize(segment.children()).unwrap(), segment.raw());
}

#[test]
fn test_fix_is_idempotent() {
    let input = recording(&info_children(TIMECODE_SCALE_MS, &[float32(ids::DURATION, 0.0)]));
    let mut file = WebmFile::new(input);

    assert!(file.fix_duration(1500.0).unwrap());
    let fixed = file.to_bytes();

    assert!(!file.fix_duration(99_000.0).unwrap());
    assert_eq!(file.duration(), Some(1500.0));
    assert_eq!(file.to_bytes(), fixed);
}

#[test]
fn test_zero_and_negative_durations_are_fixable() {
    for stored in [0.0, -0.0, -1.0, -123456.789] {
        let input = recording(&info_children(TIMECODE_SCALE_MS, &[float64(ids::DURATION, stored)]));
        let mut file = WebmFile::new(input);
        assert!(file.fix_duration(750.0).unwrap(), "stored {}", stored);
        assert_eq!(file.duration(), Some(750.0));
    }

    let input = recording(&info_children(TIMECODE_SCALE_MS, &[float32(ids::DURATION, -5.0)]));
    assert!(WebmFile::new(input).fix_duration(750.0).unwrap());
}

#[test]
fn test_positive_duration_is_left_alone() {
    for stored in [0.001, 1.0, 1e12] {
        let input = recording(&info_children(TIMECODE_SCALE_MS, &[float64(ids::DURATION, stored)]));
        let mut file = WebmFile::new(input.clone());
        assert_eq!(
            file.apply_duration_fix(5000.0).unwrap(),
            FixOutcome::AlreadyValid
        );
        assert_eq!(&file.to_bytes()[..], &input[..]);
    }
}

#[test]
fn test_missing_duration_is_appended() {
    let children = info_children(TIMECODE_SCALE_MS, &[element(ids::MUXING_APP, b"Chrome")]);
    let input = recording(&children);
    let mut file = WebmFile::new(input.clone());
    let before: Vec<u64> = info(&file).children().iter().map(|c| c.id).collect();

    assert!(file.fix_duration(3210.0).unwrap());

    let info = info(&file);
    let after: Vec<u64> = info.children().iter().map(|c| c.id).collect();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(&after[..before.len()], &before[..]);
    assert_eq!(after.last(), Some(&ids::DURATION));

    let duration = info.children().last().unwrap();
    assert_eq!(duration.element.kind(), ElementKind::Float);
    assert_eq!(info.float(ids::DURATION).unwrap().value(), 3210.0);

    // ID (2) + size (1) + double (8)
    assert!(file.to_bytes().len() >= input.len() + 11);
    assert_eq!(WebmFile::new(file.to_bytes()).duration(), Some(3210.0));
}

#[test]
fn test_timecode_scale_normalized() {
    for scale in [0, 1, TIMECODE_SCALE_MS] {
        let input = recording(&info_children(scale, &[float64(ids::DURATION, 0.0)]));
        let mut file = WebmFile::new(input);
        assert!(file.fix_duration(1000.0).unwrap());
        assert_eq!(
            WebmFile::new(file.to_bytes()).timecode_scale(),
            Some(TIMECODE_SCALE_MS)
        );
    }
}

#[test]
fn test_unknown_elements_preserved() {
    let opaque = element(UNREGISTERED, &[0x01, 0x02, 0x03, 0x04, 0x05]);
    let input = recording(
        &[
            uint(ids::TIMECODE_SCALE, 1_000_000),
            opaque,
            float64(ids::DURATION, 0.0),
        ]
        .concat(),
    );
    let mut file = WebmFile::new(input);
    assert!(file.fix_duration(42.0).unwrap());

    let reparsed = WebmFile::new(file.to_bytes());
    let info = info(&reparsed);
    let order: Vec<u64> = info.children().iter().map(|c| c.id).collect();
    assert_eq!(order, vec![ids::TIMECODE_SCALE, UNREGISTERED, ids::DURATION]);
    assert_eq!(info.children()[1].element.kind(), ElementKind::Unknown);
    assert_eq!(
        &info.children()[1].element.raw()[..],
        &[0x01, 0x02, 0x03, 0x04, 0x05]
    );

    // Untouched siblings of Info keep their bytes too
    let output = file.to_bytes();
    let tail = &segment_body(&[])[5..];
    assert!(output.ends_with(tail));
}

#[test]
fn test_missing_ancestors_not_fixable() {
    let no_segment = ebml_header();
    assert_eq!(
        WebmFile::new(no_segment).apply_duration_fix(1.0).unwrap(),
        FixOutcome::MissingSegment
    );

    let no_info = [
        ebml_header(),
        element(ids::SEGMENT, &element(ids::TRACKS, &[])),
    ]
    .concat();
    assert_eq!(
        WebmFile::new(no_info).apply_duration_fix(1.0).unwrap(),
        FixOutcome::MissingInfo
    );

    let no_scale = recording(&float64(ids::DURATION, 0.0));
    let mut file = WebmFile::new(no_scale.clone());
    assert_eq!(
        file.apply_duration_fix(1.0).unwrap(),
        FixOutcome::MissingTimecodeScale
    );
    assert_eq!(&file.to_bytes()[..], &no_scale[..]);
}

/// 8-byte unknown-size field, as MediaRecorder writes for the Segment.
const UNKNOWN_SIZE_8: &[u8] = &[0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
/// 1-byte unknown-size field.
const UNKNOWN_SIZE_1: &[u8] = &[0xFF];

fn open_element(id: u64, size_field: &[u8], content: &[u8]) -> Vec<u8> {
    [vint::encode(id).unwrap().to_vec(), size_field.to_vec(), content.to_vec()].concat()
}

/// Timecode + SimpleBlock
fn cluster_content(timecode: u8) -> Vec<u8> {
    vec![0xE7, 0x81, timecode, 0xA3, 0x84, 0x81, 0x00, 0x00, 0x80]
}

/// A streamed recording: unknown-size Segment holding Info and two
/// unknown-size Clusters.
fn streamed_recording() -> Vec<u8> {
    let info = element(
        ids::INFO,
        &info_children(TIMECODE_SCALE_MS, &[float32(ids::DURATION, 0.0)]),
    );
    let body = [
        info,
        open_element(ids::CLUSTER, UNKNOWN_SIZE_8, &cluster_content(0x00)),
        open_element(ids::CLUSTER, UNKNOWN_SIZE_1, &cluster_content(0x20)),
    ]
    .concat();
    [ebml_header(), open_element(ids::SEGMENT, UNKNOWN_SIZE_8, &body)].concat()
}

#[test]
fn test_unknown_size_round_trip() {
    let input = streamed_recording();
    let root = Container::parse(input.clone().into());

    assert_eq!(
        &serializer::serialize(root.children()).unwrap()[..],
        &input[..]
    );

    let segment = &root.children()[1];
    assert_eq!(segment.id, ids::SEGMENT);
    assert!(segment.is_unknown_size());

    let clusters: Vec<_> = segment
        .element
        .as_container()
        .unwrap()
        .children()
        .iter()
        .filter(|child| child.id == ids::CLUSTER)
        .collect();
    assert_eq!(clusters.len(), 2);
    assert!(clusters.iter().all(|cluster| cluster.is_unknown_size()));
    assert_eq!(&clusters[0].element.raw()[..], &cluster_content(0x00)[..]);
    assert_eq!(&clusters[1].element.raw()[..], &cluster_content(0x20)[..]);
}

#[test]
fn test_unknown_size_clusters_survive_fix() {
    let input = streamed_recording();
    let header_len = ebml_header().len();
    let mut file = WebmFile::new(input);
    assert!(file.fix_duration(5000.0).unwrap());

    let output = file.to_bytes();
    // Segment id, then its size field still open
    assert_eq!(&output[header_len + 4..header_len + 12], UNKNOWN_SIZE_8);

    let reparsed = WebmFile::new(output);
    assert_eq!(reparsed.duration(), Some(5000.0));
    assert_eq!(reparsed.timecode_scale(), Some(TIMECODE_SCALE_MS));

    let segment = reparsed.root().container(ids::SEGMENT).unwrap();
    let order: Vec<u64> = segment.children().iter().map(|child| child.id).collect();
    assert_eq!(order, vec![ids::INFO, ids::CLUSTER, ids::CLUSTER]);

    let clusters = &segment.children()[1..];
    assert!(clusters.iter().all(|cluster| cluster.is_unknown_size()));
    assert_eq!(&clusters[0].element.raw()[..], &cluster_content(0x00)[..]);
    assert_eq!(&clusters[1].element.raw()[..], &cluster_content(0x20)[..]);

    // Each Cluster keeps its own marker width
    let first = segment.raw().len() - 2 * cluster_content(0).len() - 5 - 12;
    assert_eq!(&segment.raw()[first + 4..first + 12], UNKNOWN_SIZE_8);
    let second = segment.raw().len() - cluster_content(0).len() - 5;
    assert_eq!(&segment.raw()[second + 4..second + 5], UNKNOWN_SIZE_1);
}

#[test]
fn test_truncated_recording() {
    let mut input = recording(&info_children(TIMECODE_SCALE_MS, &[float64(ids::DURATION, 0.0)]));
    // Cut the cluster short
    input.truncate(input.len() - 4);

    let mut file = WebmFile::new(input.clone());
    assert_eq!(&file.to_bytes()[..], &input[..]);
    assert!(file.fix_duration(800.0).unwrap());
    assert_eq!(WebmFile::new(file.to_bytes()).duration(), Some(800.0));
}

#[test]
fn test_vint_boundaries() {
    for value in [0, 126, 127, 128, 16383, 16384, 1 << 50] {
        let encoded = vint::encode(value).unwrap();
        assert_eq!(vint::decode(&encoded, 0).unwrap(), (value, encoded.len()));
    }
    assert_eq!(vint::encode(1 << 50).unwrap().len(), 8);
}

#[test]
fn test_fix_webm_duration_entry_point() {
    let input = recording(&info_children(TIMECODE_SCALE_MS, &[]));
    let blob = fix_webm_duration(input.clone(), 60_000.0, DEFAULT_MIME_TYPE).unwrap();
    assert_eq!(blob.mime_type(), "video/webm");
    assert_eq!(WebmFile::new(blob.into_bytes()).duration(), Some(60_000.0));

    let garbage = b"not a webm file at all".to_vec();
    let blob = fix_webm_duration(garbage.clone(), 60_000.0, "audio/webm").unwrap();
    assert_eq!(&blob.data()[..], &garbage[..]);
    assert_eq!(blob.mime_type(), "audio/webm");
}
