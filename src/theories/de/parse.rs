/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Text parsing for the DE interchange format: the `header.VVV` layout
//! groups and the Fortran `D`-exponent doubles of the granule files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::TheoryError;

use super::LoadedFile;

/// Parses whitespace-separated doubles written with Fortran `D` exponents.
pub fn parse_fortran_doubles(text: &str) -> Result<Vec<f64>, String> {
    let mut out = Vec::new();
    let mut buf = Vec::with_capacity(32);
    for token in text.split_ascii_whitespace() {
        buf.clear();
        for byte in token.bytes() {
            buf.push(match byte {
                b'D' | b'd' => b'E',
                other => other,
            });
        }
        match lexical_core::parse::<f64>(&buf) {
            Ok(v) => out.push(v),
            Err(_) => return Err(format!("unparseable number {token:?}")),
        }
    }
    Ok(out)
}

/// The layout description carried by `header.VVV`.
#[derive(Clone, Debug)]
pub struct DeHeader {
    pub ksize: usize,
    pub ncoeff: usize,
    /// Whole-set span and granule duration from GROUP 1030
    pub start_jd: f64,
    pub end_jd: f64,
    pub interval_days: f64,
    /// Named constants of GROUP 1040/1041, file order
    pub constants: Vec<(String, f64)>,
    /// Kilometers per astronomical unit (mandatory constant `AU`)
    pub au_km: f64,
    /// Earth/Moon mass ratio (mandatory constant `EMRAT`)
    pub emrat: f64,
    /// Per body: (1-based record offset, coefficient order, sub-intervals)
    pub layout: [(usize, usize, usize); 13],
}

impl DeHeader {
    pub fn parse(text: &str) -> Result<Self, String> {
        let (ksize, ncoeff) = parse_ksize_line(text)?;

        let g1030 = group_body(text, 1030).ok_or("missing GROUP 1030")?;
        let dates = parse_fortran_doubles(g1030)?;
        if dates.len() < 3 {
            return Err("GROUP 1030 needs start, end and interval".into());
        }

        let g1040 = group_body(text, 1040).ok_or("missing GROUP 1040")?;
        let mut names = g1040.split_ascii_whitespace();
        let n_names: usize = names
            .next()
            .and_then(|tok| tok.parse().ok())
            .ok_or("GROUP 1040 needs a count")?;
        let names: Vec<String> = names.take(n_names).map(str::to_string).collect();
        if names.len() != n_names {
            return Err(format!(
                "GROUP 1040 announces {n_names} names but carries {}",
                names.len()
            ));
        }

        let g1041 = group_body(text, 1041).ok_or("missing GROUP 1041")?;
        let values = parse_fortran_doubles(g1041)?;
        if values.len() < n_names + 1 {
            return Err("GROUP 1041 carries fewer values than GROUP 1040 names".into());
        }
        let constants: Vec<(String, f64)> = names
            .into_iter()
            .zip(values.into_iter().skip(1))
            .collect();

        let find = |key: &str| {
            constants
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| *value)
        };
        let au_km = find("AU").ok_or("mandatory constant AU missing")?;
        let emrat = find("EMRAT").ok_or("mandatory constant EMRAT missing")?;

        let g1050 = group_body(text, 1050).ok_or("missing GROUP 1050")?;
        let table: Vec<usize> = g1050
            .split_ascii_whitespace()
            .filter_map(|tok| tok.parse().ok())
            .collect();
        if table.len() < 39 {
            return Err(format!(
                "GROUP 1050 needs 3 x 13 entries, found {}",
                table.len()
            ));
        }
        let mut layout = [(0usize, 0usize, 0usize); 13];
        for (body, slot) in layout.iter_mut().enumerate() {
            *slot = (table[body], table[13 + body], table[26 + body]);
        }

        Ok(Self {
            ksize,
            ncoeff,
            start_jd: dates[0],
            end_jd: dates[1],
            interval_days: dates[2],
            constants,
            au_km,
            emrat,
            layout,
        })
    }
}

fn parse_ksize_line(text: &str) -> Result<(usize, usize), String> {
    for line in text.lines() {
        if let Some(k_idx) = line.find("KSIZE=") {
            let n_idx = line.find("NCOEFF=").ok_or("KSIZE line without NCOEFF")?;
            let ksize = line[k_idx + 6..n_idx]
                .trim()
                .parse()
                .map_err(|_| "bad KSIZE value".to_string())?;
            let ncoeff = line[n_idx + 7..]
                .trim()
                .parse()
                .map_err(|_| "bad NCOEFF value".to_string())?;
            return Ok((ksize, ncoeff));
        }
    }
    Err("missing KSIZE= NCOEFF= line".into())
}

/// The text between `GROUP nnnn` and the next `GROUP` marker.
fn group_body(text: &str, group: u32) -> Option<&str> {
    let marker = "GROUP";
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find(marker) {
        let at = search_from + rel;
        let rest = &text[at + marker.len()..];
        let mut tokens = rest.split_ascii_whitespace();
        if tokens.next().and_then(|tok| tok.parse::<u32>().ok()) == Some(group) {
            // Body runs from after the group number to the next GROUP.
            let number_end = rest.find(char::is_numeric).map(|idx| {
                idx + rest[idx..]
                    .find(char::is_whitespace)
                    .unwrap_or(rest.len() - idx)
            })?;
            let body = &rest[number_end..];
            let end = body.find("GROUP").unwrap_or(body.len());
            return Some(&body[..end]);
        }
        search_from = at + marker.len();
    }
    None
}

/// Reads just the first interval-start JD of a granule file, to index it
/// without a full parse.
pub fn peek_first_interval(path: &Path) -> Option<f64> {
    let mut file = File::open(path).ok()?;
    let mut head = [0u8; 256];
    let n = file.read(&mut head).ok()?;
    let text = String::from_utf8_lossy(&head[..n]);
    // The read may cut a token in half; drop everything past the last
    // whitespace boundary.
    let cut = text.rfind(char::is_whitespace)?;
    let numbers = parse_fortran_doubles(&text[..cut]).ok()?;
    // record index, ncoeff, start JD, ...
    numbers.get(2).copied()
}

/// Full parse of one granule file into its records. The file is mapped and
/// copied onto the heap in one move, then tokenized.
pub fn load_granule_file(path: &Path, ncoeff: usize) -> Result<LoadedFile, TheoryError> {
    let path_str = path.display().to_string();
    let path_str_for_open = path_str.clone();
    let bytes = {
        use crate::file2heap;
        file2heap!(path_str_for_open).map_err(|source| TheoryError::FileUnavailable {
            path: path_str.clone(),
            source,
        })?
    };
    let text = std::str::from_utf8(&bytes).map_err(|_| TheoryError::FileMalformed {
        path: path_str.clone(),
        reason: "granule file is not valid text".into(),
    })?;
    let numbers = parse_fortran_doubles(text).map_err(|reason| TheoryError::FileMalformed {
        path: path.display().to_string(),
        reason,
    })?;

    // Each record: record index, granule size, then the doubles, padded so
    // the line count of three per line comes out even.
    let padding = match ncoeff % 3 {
        0 => 0,
        rem => 3 - rem,
    };
    let stride = 2 + ncoeff + padding;
    if numbers.len() < stride {
        return Err(TheoryError::FileMalformed {
            path: path.display().to_string(),
            reason: format!(
                "file holds {} numbers, one record needs {stride}",
                numbers.len()
            ),
        });
    }

    let mut records = Vec::new();
    let mut cursor = 0;
    while cursor + stride <= numbers.len() {
        let announced = numbers[cursor + 1] as usize;
        if announced != ncoeff {
            return Err(TheoryError::FileMalformed {
                path: path.display().to_string(),
                reason: format!("record announces {announced} coefficients, header says {ncoeff}"),
            });
        }
        records.push(numbers[cursor + 2..cursor + 2 + ncoeff].to_vec());
        cursor += stride;
    }
    if records.is_empty() {
        return Err(TheoryError::FileMalformed {
            path: path.display().to_string(),
            reason: "no complete granule records".into(),
        });
    }

    let start_jd = records.first().map(|r| r[0]).unwrap_or(f64::NAN);
    let end_jd = records.last().map(|r| r[1]).unwrap_or(f64::NAN);
    Ok(LoadedFile {
        path: path.to_path_buf(),
        records,
        start_jd,
        end_jd,
    })
}

#[cfg(test)]
mod parse_ut {
    use super::*;

    const HEADER: &str = "\
KSIZE=  2036    NCOEFF=  1018

GROUP   1010

  JPL Planetary Ephemeris DE405/DE405
  Start Epoch: JED=  2305424.5 1599 DEC 09 00:00:00
  Final Epoch: JED=  2525008.5 2201 FEB 20 00:00:00

GROUP   1030

  2305424.50  2525008.50         32.

GROUP   1040

     4
  DENUM   AU      EMRAT   CLIGHT

GROUP   1041

     4
  0.405000000000000000D+03  0.149597870691000015D+09
  0.813005600000000044D+02  0.299792457999999984D+06

GROUP   1050

     3   171   231   309   342   366   387   405   423   441   753   819   899
    14    10    13    11     8     7     6     6     6    13    11    10    10
     4     2     2     1     1     1     1     1     1     8     2     4     4

GROUP   1070
";

    #[test]
    fn header_round_trip() {
        let h = DeHeader::parse(HEADER).unwrap();
        assert_eq!(h.ksize, 2036);
        assert_eq!(h.ncoeff, 1018);
        assert_eq!(h.start_jd, 2_305_424.5);
        assert_eq!(h.interval_days, 32.0);
        assert!((h.au_km - 149_597_870.691).abs() < 1e-3);
        assert!((h.emrat - 81.30056).abs() < 1e-5);
        assert_eq!(h.layout[0], (3, 14, 4));
        assert_eq!(h.layout[9], (441, 13, 8));
        assert_eq!(h.layout[12], (899, 10, 4));
    }

    #[test]
    fn d_exponents_parse() {
        let v = parse_fortran_doubles("0.1D+01 -2.5d-03 3.0E0 7").unwrap();
        assert_eq!(v, vec![1.0, -0.0025, 3.0, 7.0]);
    }

    #[test]
    fn missing_au_is_rejected() {
        let broken = HEADER.replace("  DENUM   AU      EMRAT   CLIGHT", "  DENUM   XX      EMRAT   CLIGHT");
        assert!(DeHeader::parse(&broken).unwrap_err().contains("AU"));
    }
}
