//! Shared fixtures and the behavior matrix every reader must satisfy.

#![allow(dead_code)]

use configfile::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::time::Duration;

/// The fixture values, keyed without prefix.
pub const FIXTURES: &[(&str, &str)] = &[
    ("empty", ""),
    ("data1", "true"),
    ("data2", "false"),
    ("data3", "9"),
    ("data4", "0"),
    ("data5", "3m5s"),
    ("data6", "aGVsbG8="),
    ("data7", "not base64!"),
];

/// Write one file per fixture into `dir`.
pub fn write_dir(dir: &Path) {
    for (key, value) in FIXTURES {
        fs::write(dir.join(key), value).unwrap();
    }
}

/// The fixtures as a YAML document.
pub fn yaml_document() -> String {
    FIXTURES
        .iter()
        .map(|(key, value)| format!("{key}: \"{value}\"\n"))
        .collect()
}

/// The fixtures as environment variables, upper-cased and prefixed.
pub fn env_vars(prefix: &str) -> HashMap<String, String> {
    FIXTURES
        .iter()
        .map(|(key, value)| (format!("{prefix}{key}").to_uppercase(), value.to_string()))
        .collect()
}

/// Assert that `f` panics.
pub fn assert_panics<T>(f: impl FnOnce() -> T) {
    assert!(
        catch_unwind(AssertUnwindSafe(f)).is_err(),
        "expected a panic"
    );
}

/// Assert that `f` does not panic.
pub fn assert_no_panic<T>(f: impl FnOnce() -> T) {
    assert!(
        catch_unwind(AssertUnwindSafe(f)).is_ok(),
        "unexpected panic"
    );
}

/// Run the full behavior matrix against `c`, where every fixture key is
/// prefixed with `prefix`.
pub fn check_reader(c: &Reader, prefix: &str) {
    let key = |name: &str| format!("{prefix}{name}");

    check_not_found(c, &key("notfound"));
    check_empty(c, &key("empty"));

    // data1 = "true"
    let k = key("data1");
    assert!(c.bool(&k));
    assert!(c.bool_or(&k, false));
    assert_no_panic(|| c.must_bool(&k));
    assert_eq!(c.int(&k), 0);
    assert_eq!(c.int_or(&k, 1), 1);
    assert_panics(|| c.must_int(&k));
    assert_eq!(c.int64_or(&k, 1), 1);
    assert_panics(|| c.must_int64(&k));
    assert_eq!(c.duration(&k), Duration::ZERO);
    assert_eq!(c.duration_or(&k, Duration::from_nanos(1)), Duration::from_nanos(1));
    assert_panics(|| c.must_duration(&k));
    assert_eq!(c.string_or(&k, "a string"), "true");
    assert_eq!(c.bytes_or(&k, "some bytes"), b"true");

    // data2 = "false"
    let k = key("data2");
    assert!(!c.bool(&k));
    assert!(!c.bool_or(&k, true));
    assert_no_panic(|| c.must_bool(&k));
    assert_eq!(c.int_or(&k, 1), 1);
    assert_panics(|| c.must_int(&k));
    assert_eq!(c.string(&k), "false");
    assert_eq!(c.bytes(&k), b"false");

    // data3 = "9"
    let k = key("data3");
    assert!(c.bool_or(&k, false));
    assert_eq!(c.int(&k), 9);
    assert_eq!(c.int_or(&k, 1), 9);
    assert_eq!(c.must_int(&k), 9);
    assert_eq!(c.int64(&k), 9);
    assert_eq!(c.int64_or(&k, 1), 9);
    assert_eq!(c.must_int64(&k), 9);
    assert_eq!(c.duration_or(&k, Duration::from_nanos(1)), Duration::from_nanos(1));
    assert_panics(|| c.must_duration(&k));
    assert_eq!(c.string(&k), "9");
    assert_eq!(c.bytes(&k), b"9");

    // data4 = "0"
    let k = key("data4");
    assert!(!c.bool(&k));
    assert!(!c.bool_or(&k, true));
    assert_no_panic(|| c.must_bool(&k));
    assert_eq!(c.int_or(&k, 1), 0);
    assert_eq!(c.int64_or(&k, 1), 0);
    assert_eq!(c.duration_or(&k, Duration::from_nanos(1)), Duration::ZERO);
    assert_no_panic(|| c.must_duration(&k));
    assert_eq!(c.string_or(&k, "a string"), "0");
    assert_eq!(c.bytes_or(&k, "some bytes"), b"0");

    // data5 = "3m5s"
    let k = key("data5");
    let expected = Duration::from_secs(3 * 60 + 5);
    assert!(c.bool(&k));
    assert_eq!(c.int_or(&k, 1), 1);
    assert_panics(|| c.must_int(&k));
    assert_eq!(c.int64_or(&k, 1), 1);
    assert_eq!(c.duration(&k), expected);
    assert_eq!(c.duration_or(&k, Duration::from_nanos(1)), expected);
    assert_eq!(c.must_duration(&k), expected);
    assert_eq!(c.string(&k), "3m5s");
    assert_eq!(c.bytes(&k), b"3m5s");

    // data6 = base64("hello")
    let k = key("data6");
    assert_eq!(c.base64(&k), b"hello");
    assert_eq!(c.base64_or(&k, "some bytes"), b"hello");
    assert_eq!(c.must_base64(&k), b"hello");
    assert_eq!(c.string(&k), "aGVsbG8=");

    // "3m5s" happens to be valid base64 as well
    assert_eq!(c.base64(&key("data5")), [222u8, 110, 108]);

    // data7 = "not base64!"
    let k = key("data7");
    assert!(c.base64(&k).is_empty());
    assert_eq!(c.base64_or(&k, "some bytes"), b"some bytes");
    assert_panics(|| c.must_base64(&k));
    assert!(matches!(c.try_base64(&k), Err(ConfigError::ParseError { .. })));
    assert_eq!(c.string(&k), "not base64!");
}

fn check_not_found(c: &Reader, k: &str) {
    assert!(!c.bool(k));
    assert!(!c.bool_or(k, false));
    assert!(c.bool_or(k, true));
    assert_panics(|| c.must_bool(k));

    assert_eq!(c.int(k), 0);
    assert_eq!(c.int_or(k, 1), 1);
    assert_panics(|| c.must_int(k));

    assert_eq!(c.int64(k), 0);
    assert_eq!(c.int64_or(k, 1), 1);
    assert_panics(|| c.must_int64(k));

    assert_eq!(c.duration(k), Duration::ZERO);
    assert_eq!(c.duration_or(k, Duration::from_nanos(1)), Duration::from_nanos(1));
    assert_panics(|| c.must_duration(k));

    assert_eq!(c.string(k), "");
    assert_eq!(c.string_or(k, "a string"), "a string");
    assert_panics(|| c.must_string(k));

    assert_eq!(c.bytes(k), Vec::<u8>::new());
    assert_eq!(c.bytes_or(k, "some bytes"), b"some bytes");
    assert_panics(|| c.must_bytes(k));

    assert_eq!(c.base64(k), Vec::<u8>::new());
    assert_eq!(c.base64_or(k, "some bytes"), b"some bytes");
    assert_panics(|| c.must_base64(k));

    assert!(c.try_bytes(k).unwrap_err().is_not_found());
}

fn check_empty(c: &Reader, k: &str) {
    // Empty is not false
    assert!(!c.bool(k));
    assert!(c.bool_or(k, true));
    assert_panics(|| c.must_bool(k));

    assert_eq!(c.int_or(k, 1), 1);
    assert_panics(|| c.must_int(k));

    assert_eq!(c.int64_or(k, 1), 1);
    assert_panics(|| c.must_int64(k));

    assert_eq!(c.duration_or(k, Duration::from_nanos(1)), Duration::from_nanos(1));
    assert_panics(|| c.must_duration(k));

    // Empty text and bytes are values, not misses
    assert_eq!(c.string(k), "");
    assert_eq!(c.string_or(k, "a string"), "");
    assert_no_panic(|| c.must_string(k));

    assert_eq!(c.bytes(k), Vec::<u8>::new());
    assert_eq!(c.bytes_or(k, "some bytes"), Vec::<u8>::new());
    assert_no_panic(|| c.must_bytes(k));

    assert_eq!(c.base64_or(k, "some bytes"), b"some bytes");
    assert_panics(|| c.must_base64(k));
}
