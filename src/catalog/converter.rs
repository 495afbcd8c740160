use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use tracing::{debug, info, warn};

use crate::astrometry::derive_position;
use crate::catalog::record::{LineContext, parse_record};
use crate::error::AppError;
use crate::models::{ConversionSummary, ConvertOptions, DerivedPosition, Distance, StarRecord};
use crate::text::split;

/// Delimiters of a data line. The newline closes the last field.
pub const FIELD_DELIMITERS: &str = ",\n";
/// Header line of the reduced catalog.
pub const OUTPUT_HEADER: &str = "Hip ID,RA,Dec,Dist";
/// Longest accepted data line in bytes, not counting the terminator.
pub const MAX_LINE_LEN: usize = 4096;

/// Converts the catalog at `opts.input` into the reduced catalog at `opts.output`.
///
/// The input is opened first; if that fails the output file is never created.
/// On a data error every row written so far is flushed before the error is
/// returned. Both files are closed when this function returns.
pub fn convert_file(opts: &ConvertOptions) -> Result<ConversionSummary, AppError> {
    let input_name = opts.input.display().to_string();
    let output_name = opts.output.display().to_string();

    let input = File::open(&opts.input).map_err(|source| AppError::OpenInput {
        path: input_name.clone(),
        source,
    })?;
    let output = File::create(&opts.output).map_err(|source| AppError::CreateOutput {
        path: output_name.clone(),
        source,
    })?;

    debug!(input = %input_name, output = %output_name, "converting catalog");

    let mut writer = BufWriter::new(output);
    let result = convert_stream(
        BufReader::new(input),
        &mut writer,
        &input_name,
        &output_name,
    );
    let flushed = writer.flush().map_err(|source| AppError::WriteOutput {
        path: output_name.clone(),
        source,
    });

    let summary = result?;
    flushed?;
    info!(
        records = summary.records_written,
        undefined_distances = summary.undefined_distances,
        output = %output_name,
        "catalog written"
    );
    Ok(summary)
}

/// Runs the header-skip / read / parse / compute / write loop over arbitrary
/// streams. `input_name` and `output_name` only label errors.
///
/// Processing stops at the first bad line; rows before it stay in `writer`.
pub fn convert_stream<R, W>(
    mut reader: R,
    mut writer: W,
    input_name: &str,
    output_name: &str,
) -> Result<ConversionSummary, AppError>
where
    R: BufRead,
    W: Write,
{
    let write_err = |source: std::io::Error| AppError::WriteOutput {
        path: output_name.to_string(),
        source,
    };

    writeln!(writer, "{OUTPUT_HEADER}").map_err(write_err)?;

    let mut summary = ConversionSummary::default();
    let mut buf = Vec::new();

    // header line is discarded without inspection, but still length-bounded
    read_raw_line(&mut reader, &mut buf, input_name, 1)?;

    let mut line_no = 1;
    loop {
        line_no += 1;
        let Some(line) = read_line(&mut reader, &mut buf, input_name, line_no)? else {
            break;
        };

        let ctx = LineContext {
            path: input_name,
            line: line_no,
        };
        let fields = split(line, FIELD_DELIMITERS);
        let star = parse_record(&fields, ctx)?;
        let pos = derive_position(&star);

        if pos.distance == Distance::Undefined {
            warn!(
                hip = star.hip,
                parallax_mas = star.parallax_mas,
                line = line_no,
                "parallax is not positive, distance undefined"
            );
            summary.undefined_distances += 1;
        }

        writeln!(writer, "{}", format_row(&star, &pos)).map_err(write_err)?;
        summary.records_written += 1;
    }

    Ok(summary)
}

/// Reads the next line into `buf`, keeping a `\n` terminator and normalizing
/// `\r\n` to `\n`. Returns `None` at end of input.
fn read_line<'b, R: BufRead>(
    reader: &mut R,
    buf: &'b mut Vec<u8>,
    input_name: &str,
    line_no: usize,
) -> Result<Option<&'b str>, AppError> {
    if !read_raw_line(reader, buf, input_name, line_no)? {
        return Ok(None);
    }

    std::str::from_utf8(buf)
        .map(Some)
        .map_err(|_| AppError::InvalidUtf8 {
            path: input_name.to_string(),
            line: line_no,
        })
}

/// Reads at most [`MAX_LINE_LEN`] bytes of content plus terminator into `buf`.
/// Returns `false` at end of input.
fn read_raw_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    input_name: &str,
    line_no: usize,
) -> Result<bool, AppError> {
    buf.clear();
    // one extra byte for the terminator, one more to detect overflow
    let limit = (MAX_LINE_LEN + 2) as u64;
    let n = reader
        .by_ref()
        .take(limit)
        .read_until(b'\n', buf)
        .map_err(|source| AppError::ReadInput {
            path: input_name.to_string(),
            source,
        })?;
    if n == 0 {
        return Ok(false);
    }

    if buf.ends_with(b"\r\n") {
        buf.truncate(buf.len() - 2);
        buf.push(b'\n');
    }
    let content_len = buf.len() - usize::from(buf.ends_with(b"\n"));
    if content_len > MAX_LINE_LEN {
        return Err(AppError::LineTooLong {
            path: input_name.to_string(),
            line: line_no,
            max: MAX_LINE_LEN,
        });
    }
    Ok(true)
}

/// Formats one output row: `Hip<id>,<ra>,<dec>,<dist>`, each value `%8.5f`.
pub fn format_row(star: &StarRecord, pos: &DerivedPosition) -> String {
    let dist = match pos.distance {
        Distance::LightYears(ly) => format!("{ly:8.5}"),
        Distance::Undefined => format!("{:>8}", "nan"),
    };
    format!(
        "Hip{},{:8.5},{:8.5},{}",
        star.hip, pos.ra_deg, pos.dec_deg, dist
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "hip,rah,ram,ras,ded,dem,des,vmag,plx,eplx,bv,ebv,dbl,hd,gl\n";

    fn run(input: &str) -> (Result<ConversionSummary, AppError>, String) {
        let mut out = Vec::new();
        let res = convert_stream(Cursor::new(input.as_bytes()), &mut out, "in.csv", "out.csv");
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn converts_a_single_record() {
        let input = format!("{HEADER}42,0,0,0,-1,30,0,5.0,1000,1,0.5,0.01,,12345,GJ 1\n");
        let (res, out) = run(&input);

        let summary = res.unwrap();
        assert_eq!(summary.records_written, 1);
        assert_eq!(summary.undefined_distances, 0);
        assert_eq!(
            out,
            "Hip ID,RA,Dec,Dist\nHip42,180.00000,-1.50000, 3.26156\n"
        );
    }

    #[test]
    fn header_only_input_writes_header_only() {
        let (res, out) = run(HEADER);
        assert_eq!(res.unwrap().records_written, 0);
        assert_eq!(out, "Hip ID,RA,Dec,Dist\n");

        let (res, out) = run("");
        assert_eq!(res.unwrap().records_written, 0);
        assert_eq!(out, "Hip ID,RA,Dec,Dist\n");
    }

    #[test]
    fn header_is_never_parsed() {
        let input = "this,header,has,too,few,fields\n1,12,0,0,0,0,0,1,100,1,1,1,,2,x\n";
        let (res, out) = run(input);
        assert_eq!(res.unwrap().records_written, 1);
        assert!(out.ends_with("Hip1, 0.00000, 0.00000,32.61564\n"));
    }

    #[test]
    fn malformed_line_stops_processing_and_keeps_prior_rows() {
        let input = format!(
            "{HEADER}1,0,0,0,0,0,0,1,1000,1,1,1,,2,x\n\
             2,0,0,0,0,0,0,1,1000,1,1,1,,2\n\
             3,0,0,0,0,0,0,1,1000,1,1,1,,2,x\n"
        );
        let (res, out) = run(&input);

        match res.unwrap_err() {
            AppError::MalformedLine { line, found, .. } => {
                assert_eq!(line, 3);
                assert_eq!(found, 14);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(out.contains("Hip1,"));
        assert!(!out.contains("Hip2,"));
        assert!(!out.contains("Hip3,"));
    }

    #[test]
    fn empty_last_field_is_counted_when_line_is_terminated() {
        let input = format!("{HEADER}5,0,0,0,0,0,0,1,1000,1,1,1,,2,\n");
        let (res, _) = run(&input);
        assert_eq!(res.unwrap().records_written, 1);
    }

    #[test]
    fn empty_last_field_without_terminator_is_malformed() {
        let input = format!("{HEADER}5,0,0,0,0,0,0,1,1000,1,1,1,,2,");
        let (res, _) = run(&input);
        assert!(matches!(
            res,
            Err(AppError::MalformedLine { found: 14, .. })
        ));
    }

    #[test]
    fn final_line_without_terminator_is_converted() {
        let input = format!("{HEADER}5,0,0,0,0,0,0,1,1000,1,1,1,,2,x");
        let (res, out) = run(&input);
        assert_eq!(res.unwrap().records_written, 1);
        assert!(out.contains("Hip5,"));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let input = "h\r\n7,0,0,0,0,0,0,1,1000,1,1,1,,2,Gl 1\r\n";
        let (res, out) = run(input);
        assert_eq!(res.unwrap().records_written, 1);
        assert!(out.contains("Hip7,180.00000, 0.00000, 3.26156\n"));
    }

    #[test]
    fn zero_parallax_is_reported_as_undefined() {
        let input = format!("{HEADER}9,0,0,0,0,0,0,1,0,1,1,1,,2,x\n");
        let (res, out) = run(&input);

        let summary = res.unwrap();
        assert_eq!(summary.records_written, 1);
        assert_eq!(summary.undefined_distances, 1);
        assert!(out.ends_with("Hip9,180.00000, 0.00000,     nan\n"));
    }

    #[test]
    fn invalid_number_stops_processing() {
        let input = format!("{HEADER}9,0,0,zero,0,0,0,1,10,1,1,1,,2,x\n");
        let (res, out) = run(&input);
        assert!(matches!(
            res,
            Err(AppError::InvalidField {
                field: "ra_seconds",
                line: 2,
                ..
            })
        ));
        assert_eq!(out, "Hip ID,RA,Dec,Dist\n");
    }

    #[test]
    fn over_long_lines_are_rejected() {
        let long = "9".repeat(MAX_LINE_LEN + 1);
        let input = format!("{HEADER}{long}\n");
        let (res, _) = run(&input);
        assert!(matches!(
            res,
            Err(AppError::LineTooLong { line: 2, max: MAX_LINE_LEN, .. })
        ));
    }

    #[test]
    fn over_long_header_is_rejected() {
        let input = format!("{}\n1,0,0,0,0,0,0,1,1000,1,1,1,,2,x\n", "h".repeat(MAX_LINE_LEN + 1));
        let (res, out) = run(&input);
        assert!(matches!(
            res,
            Err(AppError::LineTooLong { line: 1, .. })
        ));
        assert_eq!(out, "Hip ID,RA,Dec,Dist\n");
    }

    #[test]
    fn header_is_skipped_even_when_not_utf8() {
        let mut input = b"hip,\xffra\n".to_vec();
        input.extend_from_slice(b"1,0,0,0,0,0,0,1,1000,1,1,1,,2,x\n");
        let mut out = Vec::new();
        let res = convert_stream(Cursor::new(input), &mut out, "in.csv", "out.csv");
        assert_eq!(res.unwrap().records_written, 1);
    }

    #[test]
    fn non_utf8_data_line_stops_processing() {
        let mut input = HEADER.as_bytes().to_vec();
        input.extend_from_slice(b"1,0,0,0,0,0,0,1,1000,1,1,1,,2,G\xffl\n");
        let mut out = Vec::new();
        let res = convert_stream(Cursor::new(input), &mut out, "in.csv", "out.csv");

        let err = res.unwrap_err();
        assert!(matches!(err, AppError::InvalidUtf8 { line: 2, .. }));
        assert_eq!(err.to_string(), "Line 2 of 'in.csv' is not valid UTF-8");
        assert_eq!(String::from_utf8(out).unwrap(), "Hip ID,RA,Dec,Dist\n");
    }

    #[test]
    fn non_finite_coordinates_stop_processing() {
        let (res, out) = run("h\n1,nan,0,0,inf,0,0,1,1000,1,1,1,,2,x\n");
        assert!(matches!(
            res,
            Err(AppError::InvalidField { field: "ra_hours", line: 2, .. })
        ));
        assert_eq!(out, "Hip ID,RA,Dec,Dist\n");
    }

    #[test]
    fn line_at_the_length_limit_is_read_whole() {
        let row = "1,0,0,0,0,0,0,1,1000,1,1,1,,2,";
        let pad = "x".repeat(MAX_LINE_LEN - row.len());
        let input = format!("{HEADER}{row}{pad}\n");
        let (res, _) = run(&input);
        assert_eq!(res.unwrap().records_written, 1);
    }

    #[test]
    fn format_row_uses_fixed_width_fields() {
        let star = StarRecord {
            hip: 71683,
            ra: crate::models::RightAscension::new(14.0, 39.0, 36.5),
            dec: crate::models::Declination::new(-60.0, 50.0, 2.3),
            vmag: -0.01,
            parallax_mas: 742.12,
            parallax_err_mas: 1.4,
            b_v: 0.71,
            b_v_err: 0.01,
            double_star: String::new(),
            secondary_id: 128620,
            third_catalog: String::new(),
        };
        let pos = derive_position(&star);
        let row = format_row(&star, &pos);
        assert_eq!(row, "Hip71683,-49.65208,-60.83397, 4.39493");
    }
}
