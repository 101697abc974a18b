use thiserror::Error;

pub const START_MARKER: &str = "<!--START_SECTION:waka-->";
pub const END_MARKER: &str = "<!--END_SECTION:waka-->";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadmeError {
    #[error("README has no <!--START_SECTION:waka--> ... <!--END_SECTION:waka--> section")]
    MarkersNotFound,
}

/// Replace everything from the first start marker through the last end marker
/// after it with the freshly rendered report.
pub fn splice_report(document: &str, report: &str) -> Result<String, ReadmeError> {
    let start = document.find(START_MARKER).ok_or(ReadmeError::MarkersNotFound)?;
    let end = document[start..]
        .rfind(END_MARKER)
        .map(|offset| start + offset + END_MARKER.len())
        .ok_or(ReadmeError::MarkersNotFound)?;

    Ok(format!(
        "{}{}\n{}\n{}{}",
        &document[..start],
        START_MARKER,
        report,
        END_MARKER,
        &document[end..]
    ))
}
