//! Text form of a box.
//!
//! ```text
//! [SRID=n;]STBOX|GEODSTBOX[ Z| T| ZT]((lower),(upper))
//! ```
//!
//! Keywords are case-insensitive, whitespace around tokens is ignored and the
//! comma between the two corner tuples is optional. A time-only box leaves
//! its spatial slots empty: `STBOX T((,,2001-01-01),(,,2001-01-02))`.

use super::{DEFAULT_GEODETIC_SRID, STBox};
use crate::error::{Result, StboxError};
use stbox_types::temporal::Timestamp;
use std::fmt;
use std::str::FromStr;

impl fmt::Display for STBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let has_x = self.has_x();
        let has_z = self.has_z();
        let has_t = self.has_t();
        let geodetic = self.is_geodetic();

        if !has_x && !has_t {
            return write!(f, "STBOX EMPTY");
        }
        if has_x && self.srid > 0 {
            write!(f, "SRID={};", self.srid)?;
        }
        let boxtype = if geodetic { "GEODSTBOX" } else { "STBOX" };

        if !has_x {
            return write!(f, "{} T((,,{}),(,,{}))", boxtype, self.tmin, self.tmax);
        }
        if geodetic {
            if has_t {
                let z = if has_z { "Z" } else { "" };
                write!(
                    f,
                    "{} {}T(({},{},{},{}),({},{},{},{}))",
                    boxtype,
                    z,
                    self.xmin,
                    self.ymin,
                    self.zmin,
                    self.tmin,
                    self.xmax,
                    self.ymax,
                    self.zmax,
                    self.tmax
                )
            } else {
                let z = if has_z { " Z" } else { "" };
                write!(
                    f,
                    "{}{}(({},{},{}),({},{},{}))",
                    boxtype, z, self.xmin, self.ymin, self.zmin, self.xmax, self.ymax, self.zmax
                )
            }
        } else if has_z && has_t {
            write!(
                f,
                "{} ZT(({},{},{},{}),({},{},{},{}))",
                boxtype,
                self.xmin,
                self.ymin,
                self.zmin,
                self.tmin,
                self.xmax,
                self.ymax,
                self.zmax,
                self.tmax
            )
        } else if has_z {
            write!(
                f,
                "{} Z(({},{},{}),({},{},{}))",
                boxtype, self.xmin, self.ymin, self.zmin, self.xmax, self.ymax, self.zmax
            )
        } else if has_t {
            write!(
                f,
                "{} T(({},{},{}),({},{},{}))",
                boxtype, self.xmin, self.ymin, self.tmin, self.xmax, self.ymax, self.tmax
            )
        } else {
            write!(
                f,
                "{}(({},{}),({},{}))",
                boxtype, self.xmin, self.ymin, self.xmax, self.ymax
            )
        }
    }
}

impl FromStr for STBox {
    type Err = StboxError;

    fn from_str(s: &str) -> Result<Self> {
        Parser::new(s).parse()
    }
}

impl STBox {
    /// Parse the text form. Same as `s.parse::<STBox>()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stbox::STBox;
    ///
    /// let b = STBox::parse("SRID=3857;STBOX Z((1, 2, 3), (4, 5, 6))")?;
    /// assert_eq!(b.srid(), 3857);
    /// assert_eq!(b.zmax(), Some(6.0));
    /// # Ok::<(), stbox::StboxError>(())
    /// ```
    pub fn parse(s: &str) -> Result<STBox> {
        s.parse()
    }
}

fn malformed(msg: impl Into<String>) -> StboxError {
    StboxError::MalformedInput(msg.into())
}

/// Cursor over the input text.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consume `keyword` if the input continues with it, ignoring case.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.rest();
        match rest.get(..keyword.len()) {
            Some(head) if head.eq_ignore_ascii_case(keyword) => {
                self.pos += keyword.len();
                true
            }
            _ => false,
        }
    }

    fn expect_char(&mut self, c: char) -> Result<()> {
        self.skip_whitespace();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(malformed(format!(
                "Could not parse spatiotemporal box: Missing '{}'",
                c
            )))
        }
    }

    fn eat_char(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn parse_srid(&mut self) -> Result<Option<i32>> {
        self.skip_whitespace();
        if !self.eat_keyword("SRID=") {
            return Ok(None);
        }
        let rest = self.rest();
        let end = rest
            .find(';')
            .ok_or_else(|| malformed("Could not parse SRID: missing ';'"))?;
        let srid = rest[..end]
            .trim()
            .parse::<i32>()
            .map_err(|_| malformed(format!("Could not parse SRID: '{}'", &rest[..end])))?;
        self.pos += end + 1;
        Ok(Some(srid))
    }

    /// One parenthesized corner, split into trimmed fields.
    fn parse_tuple(&mut self) -> Result<Vec<&'a str>> {
        self.expect_char('(')?;
        let rest = self.rest();
        let end = rest
            .find(')')
            .ok_or_else(|| malformed("Could not parse spatiotemporal box: Missing ')'"))?;
        let body = &rest[..end];
        self.pos += end + 1;
        Ok(body.split(',').map(str::trim).collect())
    }

    fn parse(mut self) -> Result<STBox> {
        let srid = self.parse_srid()?;
        self.skip_whitespace();
        let geodetic = if self.eat_keyword("GEODSTBOX") {
            true
        } else if self.eat_keyword("STBOX") {
            false
        } else {
            return Err(malformed(
                "Could not parse spatiotemporal box: expected STBOX or GEODSTBOX",
            ));
        };

        self.skip_whitespace();
        let (has_z, has_t) = if self.eat_keyword("ZT") {
            (true, true)
        } else if self.eat_keyword("Z") {
            (true, false)
        } else if self.eat_keyword("T") {
            (false, true)
        } else {
            (false, false)
        };

        self.expect_char('(')?;
        let lower = self.parse_tuple()?;
        self.eat_char(',');
        let upper = self.parse_tuple()?;
        self.expect_char(')')?;
        self.skip_whitespace();
        if !self.rest().is_empty() {
            return Err(malformed(format!(
                "Could not parse spatiotemporal box: extraneous characters '{}'",
                self.rest()
            )));
        }

        let srid = srid.unwrap_or(if geodetic { DEFAULT_GEODETIC_SRID } else { 0 });
        let lower = Corner::read(&lower, geodetic, has_z, has_t)?;
        let upper = Corner::read(&upper, geodetic, has_z, has_t)?;
        if lower.has_x() != upper.has_x() {
            return Err(malformed(
                "Could not parse spatiotemporal box: both corners must have the same dimensions",
            ));
        }

        let b = STBox::make(
            lower.has_x(),
            has_z,
            has_t,
            geodetic,
            srid,
            lower.x.unwrap_or(0.0),
            upper.x.unwrap_or(0.0),
            lower.y.unwrap_or(0.0),
            upper.y.unwrap_or(0.0),
            lower.z.unwrap_or(0.0),
            upper.z.unwrap_or(0.0),
            lower.t.unwrap_or(Timestamp::EPOCH),
            upper.t.unwrap_or(Timestamp::EPOCH),
        );
        if !b.has_finite_space() {
            log::warn!("Parsed a box with non-finite spatial bounds: {}", b);
        }
        Ok(b)
    }
}

/// The values read from one corner tuple.
#[derive(Default)]
struct Corner {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    t: Option<Timestamp>,
}

impl Corner {
    fn has_x(&self) -> bool {
        self.x.is_some()
    }

    fn read(fields: &[&str], geodetic: bool, has_z: bool, has_t: bool) -> Result<Corner> {
        let spatial = if has_z || geodetic { 3 } else { 2 };
        let expected = spatial + usize::from(has_t);

        // Time-only corner: empty spatial slots before the timestamp. Two
        // empty slots are always accepted, three for the geodetic form.
        if has_t && !has_z && fields.len() >= 3 {
            let (slots, last) = fields.split_at(fields.len() - 1);
            let slot_count_ok = slots.len() == 2 || (geodetic && slots.len() == 3);
            if slot_count_ok && slots.iter().all(|f| f.is_empty()) {
                return Ok(Corner {
                    t: Some(parse_timestamp(last[0])?),
                    ..Corner::default()
                });
            }
        }

        if fields.len() != expected {
            return Err(malformed(format!(
                "Could not parse spatiotemporal box: expected {} values per corner, found {}",
                expected,
                fields.len()
            )));
        }

        let mut corner = Corner {
            x: Some(parse_coord(fields[0])?),
            y: Some(parse_coord(fields[1])?),
            ..Corner::default()
        };
        if spatial == 3 {
            corner.z = Some(parse_coord(fields[2])?);
        }
        if has_t {
            corner.t = Some(parse_timestamp(fields[spatial])?);
        }
        Ok(corner)
    }
}

fn parse_coord(field: &str) -> Result<f64> {
    field
        .parse::<f64>()
        .map_err(|_| malformed(format!("Could not parse coordinate: '{}'", field)))
}

fn parse_timestamp(field: &str) -> Result<Timestamp> {
    field
        .parse::<Timestamp>()
        .map_err(|e| malformed(format!("Could not parse timestamp '{}': {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_variants() {
        assert_eq!(
            STBox::xy(1.0, 2.0, 3.5, 4.0).to_string(),
            "STBOX((1,2),(3.5,4))"
        );
        assert_eq!(
            STBox::xyz(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
                .with_srid(3857)
                .to_string(),
            "SRID=3857;STBOX Z((1,2,3),(4,5,6))"
        );
        assert_eq!(
            STBox::xyt(1.0, 2.0, ts("2001-01-01"), 3.0, 4.0, ts("2001-01-02")).to_string(),
            "STBOX T((1,2,2001-01-01 00:00:00+00),(3,4,2001-01-02 00:00:00+00))"
        );
        assert_eq!(
            STBox::t(ts("2001-01-01"), ts("2001-01-02 12:30:00.5")).to_string(),
            "STBOX T((,,2001-01-01 00:00:00+00),(,,2001-01-02 12:30:00.500+00))"
        );
        assert_eq!(
            STBox::xyzt(1.0, 2.0, 3.0, ts("2001-01-01"), 4.0, 5.0, 6.0, ts("2001-01-02"))
                .to_string(),
            "STBOX ZT((1,2,3,2001-01-01 00:00:00+00),(4,5,6,2001-01-02 00:00:00+00))"
        );
    }

    #[test]
    fn test_format_geodetic() {
        assert_eq!(
            STBox::geodetic(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).to_string(),
            "SRID=4326;GEODSTBOX((1,2,3),(4,5,6))"
        );
        assert_eq!(
            STBox::geodetic_z(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).to_string(),
            "SRID=4326;GEODSTBOX Z((1,2,3),(4,5,6))"
        );
        assert_eq!(
            STBox::geodetic_t(1.0, 2.0, 3.0, ts("2001-01-01"), 4.0, 5.0, 6.0, ts("2001-01-02"))
                .to_string(),
            "SRID=4326;GEODSTBOX T((1,2,3,2001-01-01 00:00:00+00),(4,5,6,2001-01-02 00:00:00+00))"
        );
        assert_eq!(
            STBox::geodetic_zt(1.0, 2.0, 3.0, ts("2001-01-01"), 4.0, 5.0, 6.0, ts("2001-01-02"))
                .to_string(),
            "SRID=4326;GEODSTBOX ZT((1,2,3,2001-01-01 00:00:00+00),(4,5,6,2001-01-02 00:00:00+00))"
        );
    }

    #[test]
    fn test_parse_variants() {
        let b: STBox = "STBOX((1.0, 2.0), (3.0, 4.0))".parse().unwrap();
        assert_eq!(b, STBox::xy(1.0, 2.0, 3.0, 4.0));

        let b: STBox = "stbox z((1,2,3)(4,5,6))".parse().unwrap();
        assert_eq!(b, STBox::xyz(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));

        let b: STBox = "STBOX T(( , , 2001-01-01), ( , , 2001-01-02))".parse().unwrap();
        assert_eq!(b, STBox::t(ts("2001-01-01"), ts("2001-01-02")));

        let b: STBox = "STBOX ZT((1,2,3,2001-01-01),(4,5,6,2001-01-02))".parse().unwrap();
        assert_eq!(
            b,
            STBox::xyzt(1.0, 2.0, 3.0, ts("2001-01-01"), 4.0, 5.0, 6.0, ts("2001-01-02"))
        );
    }

    #[test]
    fn test_parse_geodetic_defaults_srid() {
        let b: STBox = "GEODSTBOX((1,2,3),(4,5,6))".parse().unwrap();
        assert!(b.is_geodetic() && !b.has_z());
        assert_eq!(b.srid(), DEFAULT_GEODETIC_SRID);

        let b: STBox = "SRID=4269;GEODSTBOX T((1,2,3,2001-01-01),(4,5,6,2001-01-02))"
            .parse()
            .unwrap();
        assert_eq!(b.srid(), 4269);
        assert!(b.has_t());

        // Geodetic time-only boxes drop the spatial flags altogether
        let b: STBox = "GEODSTBOX T((,,,2001-01-01),(,,,2001-01-02))".parse().unwrap();
        assert_eq!(b, STBox::t(ts("2001-01-01"), ts("2001-01-02")));
    }

    #[test]
    fn test_parse_swaps_inverted_corners() {
        let b: STBox = "STBOX((3,4),(1,2))".parse().unwrap();
        assert_eq!(b, STBox::xy(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_parse_errors() {
        for input in [
            "BOX((1,2),(3,4))",
            "STBOX((1,2),(3,4)",
            "STBOX((1,2),(3,4)))",
            "STBOX((1,a),(3,4))",
            "STBOX Z((1,2),(3,4))",
            "STBOX((1,2,3),(3,4,5))",
            "SRID=;STBOX((1,2),(3,4))",
            "SRID=12 STBOX((1,2),(3,4))",
            "STBOX T((1,2,2001-01-01),(,,2001-01-02))",
            "STBOX T((1,2,notatime),(3,4,2001-01-02))",
            "",
        ] {
            assert!(
                matches!(input.parse::<STBox>(), Err(StboxError::MalformedInput(_))),
                "expected failure for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_round_trip() {
        let boxes = [
            STBox::xy(-1.5, 0.1, 2.25, 1e10),
            STBox::xyz(0.0, 0.0, -3.0, 1.0, 1.0, 3.0).with_srid(3857),
            STBox::t(ts("2001-01-01 08:00:00.123456"), ts("2001-02-01")),
            STBox::xyt(1.0, 2.0, ts("2001-01-01"), 3.0, 4.0, ts("2001-01-02")),
            STBox::geodetic_zt(1.0, 2.0, 3.0, ts("2001-01-01"), 4.0, 5.0, 6.0, ts("2001-01-02")),
            STBox::geodetic(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).with_srid(4269),
        ];
        for b in boxes {
            let text = b.to_string();
            assert_eq!(STBox::parse(&text).unwrap(), b, "round trip of {}", text);
        }
    }
}
