use std::path::{Path, PathBuf};

use crate::types::OutputFormat;

/// Raster container extensions stripped before the suffix is appended
const KNOWN_RASTER_EXTENSIONS: &[&str] = &["img", "tif", "tiff", "vrt", "bil", "asc", "hdr", "nc"];

/// Build the output path next to `input`: known raster extension removed,
/// `suffix` appended, then the extension of `format`.
///
/// `NLCD_2016_Land_Cover_L48_20190424.img` → `NLCD_2016_Land_Cover_L48_20190424_PAD.tif`
pub fn derive_output_path(input: &Path, suffix: &str, format: OutputFormat) -> PathBuf {
    let known = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| KNOWN_RASTER_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    let base = if known {
        input.file_stem()
    } else {
        input.file_name()
    };
    let base = base.map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

    let name = format!("{}{}.{}", base, suffix, format.extension());
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nlcd_img_becomes_pad_tif() {
        let input = Path::new("NLCD_2016_Land_Cover_L48_20190424.img");
        assert_eq!(
            derive_output_path(input, "_PAD", OutputFormat::Tiff),
            PathBuf::from("NLCD_2016_Land_Cover_L48_20190424_PAD.tif")
        );
    }

    #[test]
    fn parent_directory_is_kept() {
        let input = Path::new("/data/nlcd/NLCD_2016_Land_Cover_L48_20190424.IMG");
        assert_eq!(
            derive_output_path(input, "_PAD", OutputFormat::Tiff),
            PathBuf::from("/data/nlcd/NLCD_2016_Land_Cover_L48_20190424_PAD.tif")
        );
    }

    #[test]
    fn unknown_extension_is_kept() {
        let input = Path::new("/data/landcover.2016");
        assert_eq!(
            derive_output_path(input, "_PAD", OutputFormat::Tiff),
            PathBuf::from("/data/landcover.2016_PAD.tif")
        );
    }

    #[test]
    fn no_extension_and_img_output() {
        let input = Path::new("lulc");
        assert_eq!(
            derive_output_path(input, "_GAP", OutputFormat::Img),
            PathBuf::from("lulc_GAP.img")
        );
    }

    #[test]
    fn tif_input_does_not_collide_with_itself() {
        let input = Path::new("lulc.tif");
        assert_eq!(
            derive_output_path(input, "_PAD", OutputFormat::Tiff),
            PathBuf::from("lulc_PAD.tif")
        );
    }
}
