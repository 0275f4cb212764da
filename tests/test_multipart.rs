use filedrop::http::multipart::{
    FilePart, MultipartError, boundary, find_file_part, scan_part, segments,
};

const BOUNDARY: &str = "----WebKitFormBoundary7MA4YWxkTrZu0gW";

fn form_body(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (headers, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n{headers}\r\n\r\n").as_bytes());
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

#[test]
fn test_boundary_plain() {
    let ct = format!("multipart/form-data; boundary={BOUNDARY}");
    assert_eq!(boundary(&ct), Ok(BOUNDARY));
}

#[test]
fn test_boundary_quoted_with_trailing_parameter() {
    assert_eq!(
        boundary("multipart/form-data; boundary=\"abc123\"; charset=utf-8"),
        Ok("abc123")
    );
}

#[test]
fn test_boundary_missing() {
    assert_eq!(
        boundary("multipart/form-data"),
        Err(MultipartError::MissingBoundary)
    );
    assert_eq!(
        boundary("multipart/form-data; boundary="),
        Err(MultipartError::MissingBoundary)
    );
}

#[test]
fn test_segments_split_on_every_occurrence() {
    assert_eq!(
        segments(b"--X\r\na\r\n--X--", b"X"),
        vec![&b"--"[..], &b"\r\na\r\n--"[..], &b"--"[..]]
    );
    assert_eq!(segments(b"no delimiter", b"X"), vec![&b"no delimiter"[..]]);
}

#[test]
fn test_finds_single_file_part() {
    let body = form_body(&[(
        "Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\nContent-Type: text/plain",
        b"hello world",
    )]);

    let part = find_file_part(&body, BOUNDARY).unwrap();
    assert_eq!(
        part,
        Some(FilePart {
            filename: "notes.txt",
            content: b"hello world",
        })
    );
}

#[test]
fn test_skips_plain_form_fields() {
    let body = form_body(&[
        ("Content-Disposition: form-data; name=\"comment\"", b"just text"),
        (
            "Content-Disposition: form-data; name=\"file\"; filename=\"b.bin\"",
            b"\x00\x01",
        ),
    ]);

    let part = find_file_part(&body, BOUNDARY).unwrap().unwrap();
    assert_eq!(part.filename, "b.bin");
    assert_eq!(part.content, b"\x00\x01");
}

#[test]
fn test_first_file_part_wins() {
    let body = form_body(&[
        ("Content-Disposition: form-data; name=\"a\"; filename=\"first.txt\"", b"1"),
        ("Content-Disposition: form-data; name=\"b\"; filename=\"second.txt\"", b"2"),
    ]);

    let part = find_file_part(&body, BOUNDARY).unwrap().unwrap();
    assert_eq!(part.filename, "first.txt");
}

#[test]
fn test_empty_filename_is_not_a_file_part() {
    let body = form_body(&[(
        "Content-Disposition: form-data; name=\"file\"; filename=\"\"",
        b"",
    )]);

    assert_eq!(find_file_part(&body, BOUNDARY).unwrap(), None);
}

#[test]
fn test_no_file_part() {
    let body = form_body(&[("Content-Disposition: form-data; name=\"x\"", b"y")]);
    assert_eq!(find_file_part(&body, BOUNDARY).unwrap(), None);
}

#[test]
fn test_binary_content_keeps_trailing_dashes_and_newlines() {
    let content: &[u8] = b"\xff\x00data--\r\n\n-";
    let body = form_body(&[(
        "Content-Disposition: form-data; name=\"file\"; filename=\"raw.bin\"",
        content,
    )]);

    let part = find_file_part(&body, BOUNDARY).unwrap().unwrap();
    assert_eq!(part.content, content);
}

#[test]
fn test_missing_trailing_boundary_keeps_rest_of_body() {
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cut.txt\"\r\n\r\npartial"
    );

    let part = find_file_part(body.as_bytes(), BOUNDARY).unwrap().unwrap();
    assert_eq!(part.content, b"partial");
}

#[test]
fn test_missing_blank_line_is_malformed() {
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"x.txt\"\r\ndata\r\n--{BOUNDARY}--\r\n"
    );

    assert_eq!(
        find_file_part(body.as_bytes(), BOUNDARY),
        Err(MultipartError::UnterminatedHeaders)
    );
}

#[test]
fn test_marker_only_in_body_is_ignored() {
    let body = form_body(&[(
        "Content-Disposition: form-data; name=\"note\"",
        b"looks like filename=\"evil.txt\" but is data",
    )]);

    assert_eq!(find_file_part(&body, BOUNDARY).unwrap(), None);
}

#[test]
fn test_unterminated_filename_is_malformed() {
    let body = form_body(&[(
        "Content-Disposition: form-data; name=\"file\"; filename=\"oops",
        b"x",
    )]);

    assert_eq!(
        find_file_part(&body, BOUNDARY),
        Err(MultipartError::InvalidFilename)
    );
}

#[test]
fn test_utf8_filename() {
    let body = form_body(&[(
        "Content-Disposition: form-data; name=\"file\"; filename=\"отчёт.txt\"",
        b"ok",
    )]);

    let part = find_file_part(&body, BOUNDARY).unwrap().unwrap();
    assert_eq!(part.filename, "отчёт.txt");
}

#[test]
fn test_scan_part_header_block_and_body() {
    let part = scan_part(b"\r\nContent-Type: text/plain\r\n\r\nbody\r\n--").unwrap();
    assert_eq!(part.headers, b"Content-Type: text/plain");
    assert_eq!(part.body, b"body");
    assert_eq!(part.filename(), Ok(None));
}
