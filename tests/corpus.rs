//! Test corpus: malformed streams, layout variants, limits and adapters.

use enough::{Stop, StopReason, Unstoppable};
use plainppm::*;

fn decode_err(data: &str) -> PixmapError {
    match decode(data.as_bytes(), Unstoppable) {
        Ok(m) => panic!("expected error for {data:?}, decoded {m:?}"),
        Err(e) => e,
    }
}

fn checkerboard(w: usize, h: usize) -> PixelMatrix {
    PixelMatrix::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            Color::from_bytes(200, 220, 240)
        } else {
            Color::from_bytes(10, 40, 70)
        }
    })
    .unwrap()
}

fn encode_text(matrix: &PixelMatrix, request: &EncodeRequest) -> String {
    String::from_utf8(request.encode(matrix, Unstoppable).unwrap()).unwrap()
}

// ── Labels ───────────────────────────────────────────────────────────

#[test]
fn wrong_labels_are_malformed() {
    for label in ["P6", "p3", "P33", "P", "3", "255", "P3x", "\u{feff}P3"] {
        let err = decode_err(&format!("{label} 1 1 255 0 0 0"));
        assert!(
            matches!(err, PixmapError::MalformedLabel(ref got) if got == label),
            "{label:?}: {err:?}"
        );
    }
}

#[test]
fn empty_input_is_truncated() {
    assert!(matches!(decode_err(""), PixmapError::TruncatedStream));
    assert!(matches!(decode_err("  # nothing\n\t"), PixmapError::TruncatedStream));
}

// ── Headers ──────────────────────────────────────────────────────────

#[test]
fn non_positive_or_non_integer_dimensions_are_malformed() {
    for header in [
        "0 1 255", "1 0 255", "-1 1 255", "1 -4 255", "a 1 255", "1 1.5 255", "1.0 1 255",
        "0x10 1 255", "99999999999 1 255",
    ] {
        let err = decode_err(&format!("P3 {header} 0 0 0"));
        assert!(matches!(err, PixmapError::MalformedHeader(_)), "{header:?}: {err:?}");
    }
}

#[test]
fn max_value_other_than_255_is_malformed() {
    for max in ["254", "256", "65535", "1", "0", "-255", "0255x", "max"] {
        let err = decode_err(&format!("P3 1 1 {max} 0 0 0"));
        assert!(matches!(err, PixmapError::MalformedHeader(_)), "{max:?}: {err:?}");
    }
}

#[test]
fn zero_padded_max_value_is_accepted() {
    let m = decode(b"P3 1 1 0255 1 2 3", Unstoppable).unwrap();
    assert_eq!(m.pixels()[0].to_bytes(), Some([1, 2, 3]));
}

#[test]
fn short_header_is_truncated() {
    assert!(matches!(decode_err("P3"), PixmapError::TruncatedStream));
    assert!(matches!(decode_err("P3 1 1"), PixmapError::TruncatedStream));
}

// ── Pixel data ───────────────────────────────────────────────────────

#[test]
fn missing_components_are_truncated() {
    assert!(matches!(decode_err("P3 2 1 255 0 0 0 0 0"), PixmapError::TruncatedStream));
    assert!(matches!(decode_err("P3 1 2 255 0 0 0"), PixmapError::TruncatedStream));
    assert!(matches!(decode_err("P3 1 1 255"), PixmapError::TruncatedStream));
}

#[test]
fn bad_components_are_out_of_range() {
    for token in ["256", "-1", "1e2", "12.0", "x", "+", "1000000000000000000000"] {
        let err = decode_err(&format!("P3 2 1 255 0 0 0 0 {token} 0"));
        match err {
            PixmapError::OutOfRangeComponent { row, column, token: got } => {
                assert_eq!((row, column), (0, 1));
                assert_eq!(got, token);
            }
            other => panic!("{token:?}: {other:?}"),
        }
    }
}

#[test]
fn trailing_bytes_are_not_inspected() {
    let m = decode(b"P3 1 1 255 1 2 3 garbage P6 -1", Unstoppable).unwrap();
    assert_eq!(m.pixels()[0].to_bytes(), Some([1, 2, 3]));
}

#[test]
fn whitespace_and_comments_anywhere() {
    // `#` only starts a comment between tokens
    let err = decode_err("#lead\r\nP3#tail 1 1 255 0 0 0");
    assert!(matches!(err, PixmapError::MalformedLabel(ref got) if got == "P3#tail"));

    let spaced = "\tP3\r\n# size\n2\n1 # w h\n255\n\n1\t2 3 # first\n4\r5\r6";
    let m = decode(spaced.as_bytes(), Unstoppable).unwrap();
    assert_eq!(m.pixels()[0].to_bytes(), Some([1, 2, 3]));
    assert_eq!(m.pixels()[1].to_bytes(), Some([4, 5, 6]));
}

#[test]
fn component_range_edges() {
    let m = decode(b"P3 1 1 255 0 255 +7", Unstoppable).unwrap();
    let c = m.pixels()[0];
    assert_eq!(c.red, 0.0);
    assert_eq!(c.green, 1.0);
    assert_eq!(c[Channel::Blue], normalize(7));
}

// ── Encoder layout ───────────────────────────────────────────────────

#[test]
fn default_layout_wraps_at_four_columns() {
    let m = checkerboard(6, 1);
    let text = encode_text(&m, &EncodeRequest::new());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "P3  # Plain portable pixmap",
            "6 1 255  # Width, Height, Max color component value",
            "",
            "200 220 240   10  40  70  200 220 240   10  40  70",
            "200 220 240   10  40  70",
            "",
        ]
    );
    assert!(text.ends_with("\n\n"));
}

#[test]
fn exact_multiple_of_columns_has_no_short_line() {
    let m = checkerboard(4, 2);
    let text = encode_text(&m, &EncodeRequest::new().with_columns(2).with_separator(" "));
    let body: Vec<&str> = text.lines().skip(3).collect();
    assert_eq!(
        body,
        [
            "200 220 240  10  40  70",
            "200 220 240  10  40  70",
            "",
            " 10  40  70 200 220 240",
            " 10  40  70 200 220 240",
            "",
        ]
    );
}

#[test]
fn invalid_layout_is_rejected() {
    let m = checkerboard(2, 2);
    for request in [
        EncodeRequest::new().with_columns(0),
        EncodeRequest::new().with_separator(""),
        EncodeRequest::new().with_separator(","),
        EncodeRequest::new().with_separator(" \n"),
    ] {
        let err = request.encode(&m, Unstoppable).unwrap_err();
        assert!(matches!(err, PixmapError::InvalidOptions(_)), "{:?}", request.layout());
    }
}

#[test]
fn layout_reflects_builder_overrides() {
    assert_eq!(EncodeRequest::new().layout(), &TextLayout::default());

    let request = EncodeRequest::new().with_columns(2).with_separator("\t");
    assert_eq!(request.layout().columns, 2);
    assert_eq!(request.layout().separator, "\t");

    let m = checkerboard(3, 1);
    let text = encode_text(&m, &request);
    let pixel_lines: Vec<&str> = text.lines().skip(3).filter(|l| !l.is_empty()).collect();
    assert_eq!(pixel_lines.len(), 2);
    assert_eq!(pixel_lines[0].matches('\t').count(), 1);
}

#[test]
fn out_of_gamut_colors_fail_encoding() {
    for bad in [-0.01, 1.01, f64::NAN, f64::NEG_INFINITY] {
        let mut m = checkerboard(3, 2);
        m.get_mut(2, 1).unwrap().green = bad;
        let mut sink = Vec::new();
        let err = EncodeRequest::new()
            .encode_to(&m, &mut sink, Unstoppable)
            .unwrap_err();
        match err {
            PixmapError::EncodingOverflow { row, column, .. } => assert_eq!((row, column), (1, 2)),
            other => panic!("{bad}: {other:?}"),
        }
        // nothing written on a validation failure
        assert!(sink.is_empty());
    }
}

#[test]
fn slightly_above_one_still_floors_to_255() {
    let m = PixelMatrix::filled(1, 1, Color::new(1.003, 0.0, 0.0)).unwrap();
    let decoded = decode(&encode(&m, Unstoppable).unwrap(), Unstoppable).unwrap();
    assert_eq!(decoded.pixels()[0], Color::new(1.0, 0.0, 0.0));
}

// ── Matrix construction ──────────────────────────────────────────────

#[test]
fn ragged_rows_are_rejected() {
    let row = |n: usize| vec![Color::BLACK; n];
    let err = PixelMatrix::from_rows(vec![row(3), row(3), row(2)]).unwrap_err();
    assert!(matches!(
        err,
        PixmapError::NonRectangularMatrix { row: 2, expected: 3, found: 2 }
    ));
}

#[test]
fn empty_matrices_are_rejected() {
    assert!(matches!(PixelMatrix::from_rows(vec![]), Err(PixmapError::EmptyImage)));
    assert!(matches!(PixelMatrix::from_rows(vec![vec![]]), Err(PixmapError::EmptyImage)));
    assert!(matches!(PixelMatrix::filled(0, 3, Color::BLACK), Err(PixmapError::EmptyImage)));
}

#[test]
fn rows_and_indexing_agree() {
    let rows = vec![
        vec![Color::from_bytes(1, 2, 3), Color::from_bytes(4, 5, 6)],
        vec![Color::from_bytes(7, 8, 9), Color::from_bytes(10, 11, 12)],
    ];
    let m = PixelMatrix::from_rows(rows.clone()).unwrap();
    assert_eq!((m.width(), m.height()), (2, 2));
    for (y, row) in m.rows().enumerate() {
        assert_eq!(row, &rows[y][..]);
        assert_eq!(m.row(y), Some(&rows[y][..]));
    }
    assert_eq!(m.get(1, 1), Some(&rows[1][1]));
    assert_eq!(m.get(2, 0), None);
    assert_eq!(m.row(2), None);
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_max_width() {
    let limits = Limits {
        max_width: Some(4),
        ..Default::default()
    };
    let err = DecodeRequest::new(b"P3 5 1 255")
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PixmapError::LimitExceeded(_)));
}

#[test]
fn limits_max_height() {
    let limits = Limits {
        max_height: Some(1),
        ..Default::default()
    };
    let encoded = encode(&checkerboard(1, 2), Unstoppable).unwrap();
    let err = DecodeRequest::new(&encoded)
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PixmapError::LimitExceeded(_)));
}

#[test]
fn limits_max_memory() {
    let limits = Limits {
        max_memory_bytes: Some(100),
        ..Default::default()
    };
    // header is checked before any pixel token is read
    let err = DecodeRequest::new(b"P3 100 100 255")
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PixmapError::LimitExceeded(_)));

    let ok = DecodeRequest::new(b"P3 1 1 255 9 9 9")
        .with_limits(&limits)
        .decode(Unstoppable);
    assert!(ok.is_ok());
}

#[test]
fn limits_max_memory_is_exact_matrix_size() {
    let width = 1000usize;
    let text = format!("P3 {width} 1 255 {}", "1 2 3 ".repeat(width));
    let matrix_bytes = (width * core::mem::size_of::<Color>()) as u64;

    let fits = Limits {
        max_memory_bytes: Some(matrix_bytes),
        ..Default::default()
    };
    let m = DecodeRequest::new(text.as_bytes())
        .with_limits(&fits)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(m.width(), width);

    let short = Limits {
        max_memory_bytes: Some(matrix_bytes - 1),
        ..Default::default()
    };
    let err = DecodeRequest::new(text.as_bytes())
        .with_limits(&short)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PixmapError::LimitExceeded(_)));
}

#[test]
fn overlong_component_token_is_limited() {
    let digits = format!("{}7", "0".repeat(5000));
    let err = decode_err(&format!("P3 1 1 255 {digits} 0 0"));
    assert!(matches!(err, PixmapError::LimitExceeded(_)));

    // leading zeros are fine while the token stays short
    let m = decode(b"P3 1 1 255 0000000007 0 0", Unstoppable).unwrap();
    assert_eq!(m.pixels()[0].to_bytes(), Some([7, 0, 0]));
}

#[test]
fn huge_header_without_data_is_truncated() {
    assert!(matches!(
        decode_err("P3 4294967295 4294967295 255 1 2 3"),
        PixmapError::TruncatedStream | PixmapError::DimensionsTooLarge { .. }
    ));
}

// ── Cancellation ─────────────────────────────────────────────────────

struct AlwaysStop;

impl Stop for AlwaysStop {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

#[test]
fn cancelled_decode_and_encode() {
    let err = decode(b"P3 1 1 255 0 0 0", AlwaysStop).unwrap_err();
    assert!(matches!(err, PixmapError::Cancelled(_)));

    let err = encode(&checkerboard(2, 2), AlwaysStop).unwrap_err();
    assert!(matches!(err, PixmapError::Cancelled(_)));
}

// ── Byte sources and sinks ───────────────────────────────────────────

/// Hands out at most one byte per call.
struct Trickle<'a>(&'a [u8]);

impl ByteSource for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, PixmapError> {
        match (self.0.split_first(), buf.first_mut()) {
            (Some((&b, rest)), Some(slot)) => {
                *slot = b;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn decode_from_custom_source() {
    let text = encode(&checkerboard(5, 3), Unstoppable).unwrap();
    let m = DecodeRequest::from_source(Trickle(&text))
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(m, checkerboard(5, 3));
}

#[test]
fn slice_source_leaves_trailing_bytes() {
    let mut source = SliceSource::new(b"P3 1 1 255 1 2 3\nNEXT");
    DecodeRequest::from_source(&mut source)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(source.remaining(), b"NEXT");
}

/// Accepts only the first `budget` bytes.
struct Cramped {
    budget: usize,
    taken: Vec<u8>,
}

impl ByteSink for Cramped {
    fn write(&mut self, data: &[u8]) -> Result<usize, PixmapError> {
        let n = data.len().min(self.budget);
        self.budget -= n;
        self.taken.extend_from_slice(&data[..n]);
        Ok(n)
    }
}

#[test]
fn short_write_is_reported() {
    let mut sink = Cramped {
        budget: 10,
        taken: Vec::new(),
    };
    let err = EncodeRequest::new()
        .encode_to(&checkerboard(2, 2), &mut sink, Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PixmapError::ShortWrite { written: 10, .. }), "{err:?}");
}

#[cfg(feature = "std")]
#[test]
fn io_adapters_roundtrip() {
    use plainppm::stream::{IoSink, IoSource};

    let m = checkerboard(3, 3);
    let mut sink = IoSink::new(std::io::Cursor::new(Vec::new()));
    EncodeRequest::new()
        .encode_to(&m, &mut sink, Unstoppable)
        .unwrap();
    let bytes = sink.into_inner().into_inner();

    let decoded = DecodeRequest::from_source(IoSource::new(&bytes[..]))
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(decoded, m);
}

// ── Typed pixel interop ──────────────────────────────────────────────

#[cfg(feature = "imgref")]
#[test]
fn imgref_roundtrip() {
    let m = checkerboard(4, 3);
    let img = m.to_imgvec().unwrap();
    assert_eq!((img.width(), img.height()), (4, 3));
    assert_eq!(img.buf()[0], rgb::RGB8::new(200, 220, 240));
    let back = PixelMatrix::from_imgref(img.as_ref()).unwrap();
    assert_eq!(back, m);
}

#[cfg(feature = "rgb")]
#[test]
fn rgb8_rejects_out_of_gamut() {
    let mut m = checkerboard(2, 1);
    m.pixels_mut()[1].blue = 2.0;
    assert!(matches!(
        m.to_rgb8(),
        Err(PixmapError::EncodingOverflow { row: 0, column: 1, .. })
    ));
}
