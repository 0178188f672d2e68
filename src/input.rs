use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::AppError;
use crate::model::ImageRef;

/// Image references read from an input file, plus the lines that could not be used.
#[derive(Debug, Default)]
pub struct ImageList {
    pub images: Vec<ImageRef>,
    /// 1-based line number paired with the reason the line was skipped.
    pub rejected: Vec<(usize, AppError)>,
    /// Set when reading stopped early; `images` holds what was read before it.
    pub read_error: Option<AppError>,
}

/// Extract the image reference from a `label: name[:tag]` line.
///
/// Three colon-separated parts rejoin the last two (`name:tag`); any other
/// count takes the second part alone. Whitespace is removed from the result.
pub fn extract_image_ref(line: &str) -> Result<ImageRef, AppError> {
    let parts: Vec<&str> = line.split(':').collect();

    let raw = if parts.len() == 3 {
        format!("{}:{}", parts[1], parts[2])
    } else {
        parts
            .get(1)
            .map(|part| part.to_string())
            .ok_or_else(|| AppError::MalformedLine(line.to_string()))?
    };

    let reference: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if reference.is_empty() {
        return Err(AppError::EmptyReference(line.to_string()));
    }

    Ok(ImageRef::new(reference))
}

pub fn parse_image_list<R: BufRead>(reader: R) -> ImageList {
    let mut list = ImageList::default();

    for (index, bytes) in reader.split(b'\n').enumerate() {
        let mut bytes = match bytes {
            Ok(bytes) => bytes,
            Err(err) => {
                list.read_error = Some(AppError::Io(err));
                break;
            }
        };
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        // A line that is not UTF-8 is rejected on its own; reading continues.
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(err) => {
                let lossy = String::from_utf8_lossy(err.as_bytes()).into_owned();
                list.rejected.push((index + 1, AppError::MalformedLine(lossy)));
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match extract_image_ref(&line) {
            Ok(image) => list.images.push(image),
            Err(err) => list.rejected.push((index + 1, err)),
        }
    }

    list
}

pub fn load_image_list(path: &Path) -> Result<ImageList, AppError> {
    let file = File::open(path)?;
    Ok(parse_image_list(BufReader::new(file)))
}
