/*!
 * Binary content classification
 *
 * Policy, in order: known binary extension (no I/O), null byte in the first
 * 1024 bytes, otherwise strict UTF-8 text. Any read or decode failure
 * degrades to the unreadable marker instead of failing the scan.
 */

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;

use crate::types::FileContent;

/// Number of leading bytes sniffed for a null byte
pub const SNIFF_LEN: usize = 1024;

/// Lowercase file extensions (without the dot) treated as binary without reading content
pub static BINARY_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Images
        "png",
        "jpg",
        "jpeg",
        "jpe",
        "jif",
        "jfif",
        "jfi",
        "gif",
        "bmp",
        "dib",
        "tiff",
        "tif",
        "webp",
        "ico",
        "cur",
        "psd",
        "xcf",
        "ai",
        "eps",
        "svgz",
        "indd",
        "sketch",
        "raw",
        "cr2",
        "nef",
        "orf",
        "sr2",
        "raf",
        "arw",
        // Video
        "mp4",
        "mkv",
        "mov",
        "avi",
        "wmv",
        "flv",
        "webm",
        "3gp",
        "3g2",
        "m4v",
        "mpg",
        "mpeg",
        "mp2",
        "m2ts",
        "rm",
        "rmvb",
        "vob",
        "ogv",
        "asf",
        "amv",
        "f4v",
        "bik",
        "drc",
        "nsv",
        // Audio
        "mp3",
        "wav",
        "ogg",
        "oga",
        "flac",
        "aac",
        "m4a",
        "wma",
        "alac",
        "aiff",
        "au",
        "mid",
        "midi",
        "amr",
        "ra",
        "opus",
        "voc",
        "snd",
        "mod",
        "xm",
        "it",
        "s3m",
        // Fonts
        "ttf",
        "otf",
        "woff",
        "woff2",
        "eot",
        "fnt",
        "fon",
        "pfb",
        "pfm",
        "pfa",
        "afm",
        // Archives and Compression
        "zip",
        "rar",
        "7z",
        "tar",
        "gz",
        "bz2",
        "xz",
        "lz",
        "lzma",
        "z",
        "cab",
        "arj",
        "ace",
        "sit",
        "tgz",
        "tbz2",
        "txz",
        "uue",
        "uu",
        "cpgz",
        "hqx",
        "sea",
        "arc",
        "pak",
        "apk",
        "aab",
        "xpi",
        "crx",
        // Documents (Binary or semi-binary)
        "pdf",
        "doc",
        "docx",
        "xls",
        "xlsx",
        "ppt",
        "pptx",
        "vsd",
        "pub",
        "rtf",
        "odt",
        "ods",
        "odp",
        "djvu",
        "pages",
        "key",
        "numbers",
        // Executables and Libraries
        "exe",
        "dll",
        "so",
        "o",
        "obj",
        "a",
        "lib",
        "dylib",
        "bin",
        "out",
        "app",
        "sys",
        "msi",
        "com",
        "scr",
        "pif",
        "jar",
        "war",
        "ear",
        "pyc",
        "pyd",
        "nexe",
        "dex",
        "iso",
        "img",
        "elf",
        "class",
        // Disk Images, Backups, Virtual Disks
        "dmg",
        "vdi",
        "vmdk",
        "vhd",
        "vhdx",
        "qcow2",
        "sparseimage",
        "toast",
        "nrg",
        "mdf",
        "cue",
        "cdi",
        // Databases and Data Files
        "db",
        "sqlite",
        "sqlite3",
        "db3",
        "mdb",
        "accdb",
        "ndf",
        "ldf",
        "frm",
        "ibd",
        "myd",
        "myi",
        "parquet",
        "feather",
        "arrow",
        "hdf5",
        "h5",
        "bson",
        "dta",
        "sav",
        "sas7bdat",
        "xpt",
        "mat",
        "fdb",
        "gdb",
        "tdb",
        "cdb",
        "pdb",
        // Cache, Logs, Lock Files
        "lock",
        "log",
        "bak",
        "tmp",
        "cache",
        "swap",
        "mem",
        "dmp",
        "core",
        "trace",
        // Games and Emulators
        "rom",
        "nds",
        "gba",
        "gb",
        "gci",
        "srm",
        "psv",
        "rpf",
        "dat",
        "wad",
        "wad2",
        "wad3",
        "bsp",
        "vpk",
        "psarc",
        // CAD, 3D Models, AR/VR
        "stl",
        "fbx",
        "dae",
        "3ds",
        "blend",
        "max",
        "c4d",
        "glb",
        "gltf",
        "lwo",
        "skp",
        "igs",
        "step",
        "stp",
        // Scientific and Technical
        "hdf",
        "grib",
        "nc",
        "npz",
        "npy",
        "dcm",
        "nii",
        "mhd",
        "hdr",
        // Medical Imaging
        "ima",
        "nrrd",
        // Machine Learning, AI Models, Training Data
        "pt",
        "pth",
        "ckpt",
        "tflite",
        "pb",
        "onnx",
        "joblib",
        "pkl",
        "model",
        "weights",
        // Certificates, Keys, Secure Files
        "p12",
        "pfx",
        "cer",
        "crt",
        "pem",
        "der",
        "csr",
        "jks",
        "keystore",
        "asc",
        "gpg",
        // Plugin / Extension Binaries
        "vst",
        "vst3",
        "component",
        "aax",
        "lv2",
        "plugin",
        "nks",
        // Flash and Legacy Web
        "swf",
        "fla",
        "xap",
        // Map, GIS, and Navigation
        "shp",
        "shx",
        "dbf",
        "mxd",
        "kml",
        "kmz",
        "osm",
        "dem",
        "sid",
        "tpk",
        // Miscellaneous
        "enc",
        "res",
        "cso",
        "pkg",
        "crdownload",
        "part",
        "swp",
        "psb",
        "xmind",
        "sparsebundle",
        "bbl",
        "bblx",
        "bblt",
        "bbx",
        "idx",
        "toc",
        "aux",
        // Email & Office Internal
        "pst",
        "ost",
        "eml",
        "msg",
        // Streaming and Media Index
        "m3u",
        "m3u8",
        "pls",
        "asx",
        // Digital Publishing
        "epub",
        "mobi",
        "azw",
        "azw3",
        "kfx",
        // Proprietary Formats
        "fig",
        "xd",
        "drawio",
        "visio",
        "onepkg",
        "one",
        "note",
        "snp",
    ]
    .into_iter()
    .collect()
});

/// Whether the path's lowercased extension is in the binary set
pub fn has_binary_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| BINARY_EXTENSIONS.contains(ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Whether a content sample looks binary
pub fn sniff_is_binary(sample: &[u8]) -> bool {
    sample.contains(&0)
}

/// Classify a non-empty file's content
pub fn classify(path: &Path) -> FileContent {
    if has_binary_extension(path) {
        return FileContent::Binary;
    }

    let mut sample = Vec::with_capacity(SNIFF_LEN);
    let sampled = File::open(path)
        .and_then(|file| file.take(SNIFF_LEN as u64).read_to_end(&mut sample));
    if let Err(e) = sampled {
        debug!("Cannot sample {}: {}", path.display(), e);
        return FileContent::Unreadable;
    }

    if sniff_is_binary(&sample) {
        return FileContent::Binary;
    }

    match fs::read(path).map(String::from_utf8) {
        Ok(Ok(text)) => FileContent::Text(text),
        Ok(Err(e)) => {
            debug!("{} is not valid UTF-8: {}", path.display(), e);
            FileContent::Unreadable
        }
        Err(e) => {
            debug!("Cannot read {}: {}", path.display(), e);
            FileContent::Unreadable
        }
    }
}
