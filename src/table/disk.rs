//! cBpack files on disk.
//!
//! A cBpack file is a gzip-compressed msgpack array. Element 0 is the header
//! `{"format": "cB", "version": 1}`; every further element is one bucket, an
//! array of strings. Files are named `<wordlist>_<lang>.msgpack.gz`; names
//! starting with `_` hold auxiliary data, such as the Chinese character map.

use std::{
    collections::{BTreeMap, HashMap},
    fs::{self, File},
    io::{BufReader, ErrorKind},
    path::{Path, PathBuf},
};

use flate2::read::GzDecoder;
use rmpv::Value;

use super::{Availability, Buckets, TableSource};
use crate::{
    config::DataConfig,
    error::{Result, WordFreqError},
    stage::SimplificationMap,
};

pub const TABLE_SUFFIX: &str = ".msgpack.gz";
pub const CHINESE_MAPPING_FILE: &str = "_chinese_mapping.msgpack.gz";

const FORMAT_MARKER: &str = "cB";
const FORMAT_VERSION: u64 = 1;

/// Tables in a data directory. The directory is indexed once on
/// construction.
#[derive(Debug, Clone)]
pub struct DiskSource {
    config: DataConfig,
    index: BTreeMap<String, Availability>,
}

impl DiskSource {
    pub fn open(config: DataConfig) -> Result<Self> {
        let index = scan(config.dir())?;
        tracing::debug!(
            data_dir = %config.dir().display(),
            wordlists = index.len(),
            "indexed frequency tables"
        );
        Ok(Self { config, index })
    }
}

fn scan(dir: &Path) -> Result<BTreeMap<String, Availability>> {
    let io_err = |source| WordFreqError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut index: BTreeMap<String, Availability> = BTreeMap::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if name.starts_with('_') {
            continue;
        }
        let Some((wordlist, lang)) = name
            .strip_suffix(TABLE_SUFFIX)
            .and_then(|stem| stem.split_once('_'))
        else {
            continue;
        };
        index
            .entry(wordlist.to_string())
            .or_default()
            .insert(lang.to_string(), entry.path().to_string_lossy().into_owned());
    }
    Ok(index)
}

fn read_packed(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|source| WordFreqError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(GzDecoder::new(file));
    rmpv::decode::read_value(&mut reader).map_err(|source| WordFreqError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(path: &Path, reason: impl Into<String>) -> WordFreqError {
    WordFreqError::InvalidTable {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn header_field<'v>(header: &'v [(Value, Value)], key: &str) -> Option<&'v Value> {
    header
        .iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

/// Validate the header and unpack the buckets.
pub fn decode_buckets(value: Value, path: &Path) -> Result<Buckets> {
    let Value::Array(items) = value else {
        return Err(invalid(path, "top level is not an array"));
    };
    let mut items = items.into_iter();

    let header = items.next().ok_or_else(|| invalid(path, "missing header"))?;
    let header = match header {
        Value::Map(header) => header,
        other => return Err(invalid(path, format!("header is not a map: {other}"))),
    };
    let format = header_field(&header, "format").and_then(Value::as_str);
    let version = header_field(&header, "version").and_then(Value::as_u64);
    if format != Some(FORMAT_MARKER) || version != Some(FORMAT_VERSION) {
        return Err(invalid(
            path,
            format!("unsupported header (format {format:?}, version {version:?})"),
        ));
    }

    items
        .enumerate()
        .map(|(index, bucket)| {
            let Value::Array(words) = bucket else {
                return Err(invalid(path, format!("bucket {index} is not an array")));
            };
            words
                .into_iter()
                .map(|word| match word {
                    Value::String(s) => s
                        .into_str()
                        .ok_or_else(|| invalid(path, format!("bucket {index} has invalid UTF-8"))),
                    other => Err(invalid(
                        path,
                        format!("bucket {index} has a non-string member: {other}"),
                    )),
                })
                .collect::<Result<Vec<String>>>()
        })
        .collect()
}

/// Read and validate one cBpack file.
pub fn read_cbpack(path: &Path) -> Result<Buckets> {
    let buckets = decode_buckets(read_packed(path)?, path)?;
    tracing::debug!(path = %path.display(), buckets = buckets.len(), "loaded cBpack table");
    Ok(buckets)
}

fn decode_mapping(value: Value, path: &Path) -> Result<SimplificationMap> {
    let Value::Map(entries) = value else {
        return Err(invalid(path, "character map is not a map"));
    };

    let mut map = HashMap::with_capacity(entries.len());
    for (key, target) in entries {
        let code = match &key {
            Value::Integer(i) => i.as_u64(),
            Value::String(s) => s.as_str().and_then(|s| s.parse::<u64>().ok()),
            _ => None,
        };
        let source = code
            .and_then(|c| u32::try_from(c).ok())
            .and_then(char::from_u32)
            .ok_or_else(|| invalid(path, format!("bad code point key: {key}")))?;
        let target = target
            .as_str()
            .ok_or_else(|| invalid(path, format!("bad target for {source:?}")))?;
        map.insert(source, target.to_string());
    }
    Ok(SimplificationMap::new(map))
}

impl TableSource for DiskSource {
    fn list(&self, wordlist: &str) -> Result<Availability> {
        Ok(self.index.get(wordlist).cloned().unwrap_or_default())
    }

    fn load(&self, locator: &str) -> Result<Buckets> {
        read_cbpack(&PathBuf::from(locator))
    }

    fn simplification_map(&self) -> Result<SimplificationMap> {
        let path = self.config.path(CHINESE_MAPPING_FILE);
        match read_packed(&path) {
            Ok(value) => {
                let map = decode_mapping(value, &path)?;
                tracing::debug!(path = %path.display(), entries = map.len(), "loaded Chinese character map");
                Ok(map)
            }
            Err(WordFreqError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no Chinese character map, using identity");
                Ok(SimplificationMap::default())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{Compression, write::GzEncoder};
    use std::io::Write;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn write_gz(path: &Path, value: &Value) -> TestResult {
        let mut packed = Vec::new();
        rmpv::encode::write_value(&mut packed, value)?;
        let mut gz = GzEncoder::new(File::create(path)?, Compression::default());
        gz.write_all(&packed)?;
        gz.finish()?;
        Ok(())
    }

    fn header(format: &str, version: u64) -> Value {
        Value::Map(vec![
            (Value::from("format"), Value::from(format)),
            (Value::from("version"), Value::from(version)),
        ])
    }

    fn bucket(words: &[&str]) -> Value {
        Value::Array(words.iter().map(|w| Value::from(*w)).collect())
    }

    #[test]
    fn reads_a_valid_table() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("small_en.msgpack.gz");
        write_gz(
            &path,
            &Value::Array(vec![header("cB", 1), bucket(&["the"]), bucket(&[]), bucket(&["of", "and"])]),
        )?;

        let buckets = read_cbpack(&path)?;
        assert_eq!(buckets, vec![vec!["the"], vec![], vec!["of", "and"]]);
        Ok(())
    }

    #[test]
    fn rejects_wrong_header() -> TestResult {
        let dir = tempfile::tempdir()?;
        for (name, head) in [("v2", header("cB", 2)), ("fmt", header("dB", 1))] {
            let path = dir.path().join(format!("{name}.msgpack.gz"));
            write_gz(&path, &Value::Array(vec![head, bucket(&["x"])]))?;
            assert!(matches!(
                read_cbpack(&path),
                Err(WordFreqError::InvalidTable { .. })
            ));
        }
        Ok(())
    }

    #[test]
    fn rejects_non_string_members() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bad.msgpack.gz");
        write_gz(
            &path,
            &Value::Array(vec![header("cB", 1), Value::Array(vec![Value::from(7)])]),
        )?;
        assert!(matches!(
            read_cbpack(&path),
            Err(WordFreqError::InvalidTable { .. })
        ));
        Ok(())
    }

    #[test]
    fn garbage_is_a_decode_or_io_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("junk.msgpack.gz");
        fs::write(&path, b"not gzip at all")?;
        assert!(matches!(
            read_cbpack(&path),
            Err(WordFreqError::Decode { .. } | WordFreqError::Io { .. })
        ));
        Ok(())
    }

    #[test]
    fn indexes_the_directory() -> TestResult {
        let dir = tempfile::tempdir()?;
        let table = Value::Array(vec![header("cB", 1), bucket(&["w"])]);
        write_gz(&dir.path().join("small_en.msgpack.gz"), &table)?;
        write_gz(&dir.path().join("large_en.msgpack.gz"), &table)?;
        write_gz(&dir.path().join("small_zh.msgpack.gz"), &table)?;
        write_gz(&dir.path().join(CHINESE_MAPPING_FILE), &Value::Map(vec![]))?;
        fs::write(dir.path().join("jieba_zh.txt"), "w 1 n\n")?;

        let source = DiskSource::open(DataConfig::new(dir.path()))?;
        let small = source.list("small")?;
        assert_eq!(small.keys().collect::<Vec<_>>(), ["en", "zh"]);
        assert_eq!(source.list("large")?.len(), 1);
        assert!(source.list("_chinese")?.is_empty());
        assert_eq!(source.load(&small["en"])?, vec![vec!["w"]]);
        Ok(())
    }

    #[test]
    fn chinese_map_accepts_int_and_string_keys() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_gz(
            &dir.path().join(CHINESE_MAPPING_FILE),
            &Value::Map(vec![
                (Value::from(u64::from('漢')), Value::from("汉")),
                (Value::from(u32::from('語').to_string()), Value::from("语")),
            ]),
        )?;
        let map = DiskSource::open(DataConfig::new(dir.path()))?.simplification_map()?;
        assert_eq!(map.get('漢'), Some("汉"));
        assert_eq!(map.get('語'), Some("语"));
        Ok(())
    }

    #[test]
    fn missing_chinese_map_is_identity() -> TestResult {
        let dir = tempfile::tempdir()?;
        let map = DiskSource::open(DataConfig::new(dir.path()))?.simplification_map()?;
        assert!(map.is_empty());
        Ok(())
    }
}
