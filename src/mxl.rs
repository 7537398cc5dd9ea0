//! MXL file handler: reads compressed MusicXML (.mxl) archives.
//!
//! An .mxl file is a ZIP archive containing:
//!   - META-INF/container.xml: declares the root MusicXML file path
//!   - <rootfile>.xml        : the actual MusicXML content (e.g., score.xml)
//!   - (optional) other files: images, sounds, etc.

use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::error::{Result, ScoreError};
use crate::model::Note;
use crate::parser;

type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Read and parse a .mxl file from raw bytes.
pub fn parse_mxl(data: &[u8]) -> Result<Vec<Note>> {
    let xml = extract_musicxml_from_mxl(data)?;
    parser::parse_musicxml(&xml)
}

/// Extract the MusicXML content string from .mxl bytes.
///
/// The container descriptor wins when it names an entry that exists;
/// otherwise the first `.xml` file outside `META-INF` is used.
pub fn extract_musicxml_from_mxl(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    if let Some(path) = rootfile_from_container(&mut archive)? {
        if archive.index_for_name(&path).is_some() {
            return read_entry(&mut archive, &path);
        }
        log::warn!("container.xml names '{path}' but the archive has no such entry");
    }

    match first_xml_entry(&mut archive) {
        Some(path) => read_entry(&mut archive, &path),
        None => Err(ScoreError::NoScoreFile),
    }
}

/// The `full-path` of the first `<rootfile>` in the container descriptor,
/// if the archive has one.
fn rootfile_from_container(archive: &mut Archive) -> Result<Option<String>> {
    let container = archive
        .file_names()
        .find(|name| name.to_ascii_lowercase().ends_with("container.xml"))
        .map(String::from);
    let Some(container) = container else {
        return Ok(None);
    };

    let xml = read_entry(archive, &container)?;
    let doc = match roxmltree::Document::parse(&xml) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("ignoring unreadable {container}: {e}");
            return Ok(None);
        }
    };

    Ok(doc
        .descendants()
        .find(|n| n.tag_name().name() == "rootfile")
        .and_then(|n| n.attribute("full-path"))
        .filter(|p| !p.is_empty())
        .map(String::from))
}

fn first_xml_entry(archive: &mut Archive) -> Option<String> {
    (0..archive.len()).find_map(|i| {
        let file = archive.by_index(i).ok()?;
        let name = file.name();
        let candidate = name.ends_with(".xml")
            && !file.is_dir()
            && !name.to_ascii_lowercase().starts_with("meta-inf");
        candidate.then(|| name.to_string())
    })
}

fn read_entry(archive: &mut Archive, path: &str) -> Result<String> {
    let mut file = archive.by_name(path)?;
    // the declared size is untrusted archive metadata
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| ScoreError::InvalidUtf8(e.utf8_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const SCORE: &str = "<score-partwise><part id=\"P1\"><measure><note><rest/></note></measure></part></score-partwise>";

    fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn follows_container_rootfile() {
        let data = archive(&[
            (
                "META-INF/container.xml",
                r#"<container><rootfiles><rootfile full-path="score/main.xml"/></rootfiles></container>"#,
            ),
            ("decoy.xml", "<not-a-score/>"),
            ("score/main.xml", SCORE),
        ]);
        assert_eq!(extract_musicxml_from_mxl(&data).unwrap(), SCORE);
    }

    #[test]
    fn falls_back_to_first_xml_entry() {
        let data = archive(&[("META-INF/other.xml", "<x/>"), ("readme.txt", "hi"), ("song.xml", SCORE)]);
        assert_eq!(extract_musicxml_from_mxl(&data).unwrap(), SCORE);
    }

    #[test]
    fn dangling_rootfile_falls_back() {
        let data = archive(&[
            ("META-INF/container.xml", r#"<container><rootfile full-path="gone.xml"/></container>"#),
            ("song.xml", SCORE),
        ]);
        assert_eq!(parse_mxl(&data).unwrap().len(), 1);
    }

    #[test]
    fn archive_without_score_fails() {
        let data = archive(&[("image.png", "png")]);
        let err = extract_musicxml_from_mxl(&data).unwrap_err();
        assert!(matches!(err, ScoreError::NoScoreFile));
        assert_eq!(err.to_string(), "no valid score file found");
    }

    fn crc32(data: &[u8]) -> u32 {
        let mut crc = !0u32;
        for &b in data {
            crc ^= b as u32;
            for _ in 0..8 {
                crc = if crc & 1 == 1 { (crc >> 1) ^ 0xEDB8_8320 } else { crc >> 1 };
            }
        }
        !crc
    }

    /// One stored entry whose central directory claims a zip64
    /// uncompressed size of `declared` bytes.
    fn archive_declaring_size(name: &str, body: &str, declared: u64) -> Vec<u8> {
        let (name, body) = (name.as_bytes(), body.as_bytes());
        let crc = crc32(body);
        let mut out = Vec::new();

        out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
        out.extend_from_slice(&20u16.to_le_bytes());
        out.extend_from_slice(&[0; 8]); // flags, method, time, date
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(name);
        out.extend_from_slice(body);

        let cd_offset = out.len() as u32;
        out.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes());
        out.extend_from_slice(&[0; 8]); // flags, method, time, date
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(&u32::MAX.to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&12u16.to_le_bytes());
        out.extend_from_slice(&[0; 10]); // comment len, disk, attributes
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(name);
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&8u16.to_le_bytes());
        out.extend_from_slice(&declared.to_le_bytes());
        let cd_size = out.len() as u32 - cd_offset;

        out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&cd_size.to_le_bytes());
        out.extend_from_slice(&cd_offset.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out
    }

    #[test]
    fn declared_size_is_not_trusted() {
        let data = archive_declaring_size("song.xml", SCORE, 0xFFFF_FFFF_FFFF_FF00);
        match extract_musicxml_from_mxl(&data) {
            Ok(xml) => assert_eq!(xml, SCORE),
            Err(e) => assert!(matches!(e, ScoreError::Archive(_) | ScoreError::Io(_)), "{e}"),
        }
    }

    #[test]
    fn not_a_zip() {
        assert!(matches!(extract_musicxml_from_mxl(b"plain text"), Err(ScoreError::Archive(_))));
    }
}
