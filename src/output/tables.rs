//! CSV measurement tables.
//!
//! Column orders are fixed; optional acoustic fields are written empty when
//! extraction produced nothing for that measure.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{io_error, OutputError};
use crate::core::measurement::{PhonemeMeasurement, WordMeasurement};

const PHONEME_HEADER: &str = "file,phoneme,start_time,end_time,duration,is_vowel,\
f1_mean,f1_std,f2_mean,f2_std,f3_mean,f3_std,\
f0_mean,f0_std,f0_min,f0_max,f0_range,\
intensity_mean,intensity_std,intensity_min,intensity_max";

const WORD_HEADER: &str = "file,word,start_time,end_time,duration";

pub fn write_phoneme_table(path: &Path, rows: &[PhonemeMeasurement]) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut out = BufWriter::new(file);

    let write = |out: &mut BufWriter<File>, line: String| -> Result<(), OutputError> {
        writeln!(out, "{line}").map_err(|e| io_error(path, e))
    };

    write(&mut out, PHONEME_HEADER.to_string())?;
    for p in rows {
        let mut fields: Vec<String> = vec![
            escape(&p.file),
            escape(&p.phoneme),
            p.start_time.to_string(),
            p.end_time.to_string(),
            p.duration.to_string(),
            p.is_vowel.to_string(),
        ];

        match &p.formants {
            Some(f) => {
                fields.push(f.f1.mean.to_string());
                fields.push(f.f1.std.to_string());
                push_optional(&mut fields, f.f2.map(|t| t.mean));
                push_optional(&mut fields, f.f2.map(|t| t.std));
                push_optional(&mut fields, f.f3.map(|t| t.mean));
                push_optional(&mut fields, f.f3.map(|t| t.std));
            }
            None => fields.extend(std::iter::repeat(String::new()).take(6)),
        }

        match &p.pitch {
            Some(f0) => {
                fields.push(f0.mean.to_string());
                fields.push(f0.std.to_string());
                fields.push(f0.min.to_string());
                fields.push(f0.max.to_string());
                fields.push(f0.range.to_string());
            }
            None => fields.extend(std::iter::repeat(String::new()).take(5)),
        }

        match &p.intensity {
            Some(i) => {
                fields.push(i.mean.to_string());
                fields.push(i.std.to_string());
                fields.push(i.min.to_string());
                fields.push(i.max.to_string());
            }
            None => fields.extend(std::iter::repeat(String::new()).take(4)),
        }

        write(&mut out, fields.join(","))?;
    }

    out.flush().map_err(|e| io_error(path, e))
}

pub fn write_word_table(path: &Path, rows: &[WordMeasurement]) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{WORD_HEADER}").map_err(|e| io_error(path, e))?;
    for w in rows {
        writeln!(
            out,
            "{},{},{},{},{}",
            escape(&w.file),
            escape(&w.word),
            w.start_time,
            w.end_time,
            w.duration
        )
        .map_err(|e| io_error(path, e))?;
    }

    out.flush().map_err(|e| io_error(path, e))
}

fn push_optional(fields: &mut Vec<String>, value: Option<f64>) {
    fields.push(value.map(|v| v.to_string()).unwrap_or_default());
}

/// Quote a field when it contains a delimiter, quote, or newline.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
