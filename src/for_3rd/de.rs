//! Deserialization of Real.

use core::fmt::Formatter;

use serde::de::Error;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer};

use crate::defs::Precision;
use crate::Real;

const FIELDS: &[&str] = &["prec", "value"];

pub struct RealVisitor {}

impl<'de> Deserialize<'de> for Real {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RealVisitor {})
    }
}

impl<'de> Visitor<'de> for RealVisitor {
    type Value = Real;

    fn expecting(&self, formatter: &mut Formatter) -> core::fmt::Result {
        write!(formatter, "a number, a decimal string, or a structure of `prec` and `value`")
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Real::from(v))
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Real::from(v))
    }

    fn visit_i128<E: Error>(self, v: i128) -> Result<Self::Value, E> {
        Ok(Real::from(v))
    }

    fn visit_u128<E: Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(Real::from(v))
    }

    fn visit_f32<E: Error>(self, v: f32) -> Result<Self::Value, E> {
        Ok(Real::from(v))
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Real::from(v))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<Real>().map_err(Error::custom)
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
        self.visit_str(&v)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut prec: Option<Precision> = None;
        let mut value: Option<String> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "prec" => {
                    if prec.is_some() {
                        return Err(Error::duplicate_field("prec"));
                    }
                    prec = Some(map.next_value()?);
                }
                "value" => {
                    if value.is_some() {
                        return Err(Error::duplicate_field("value"));
                    }
                    value = Some(map.next_value()?);
                }
                k => return Err(Error::unknown_field(k, FIELDS)),
            }
        }

        let prec = prec.ok_or_else(|| Error::missing_field("prec"))?;
        let value = value.ok_or_else(|| Error::missing_field("value"))?;

        Real::parse(&value, prec).map_err(Error::custom)
    }
}

#[cfg(test)]
mod tests {

    use gmp_mpfr_sys::mpfr;
    use rand::random;
    use serde_json::from_str;
    use serde_json::to_string;

    use crate::Real;

    fn same_value(a: &Real, b: &Real) -> bool {
        unsafe { mpfr::equal_p(a.as_raw(), b.as_raw()) != 0 }
    }

    #[test]
    fn from_json() {
        let n = from_str::<Real>("123").unwrap();
        assert_eq!(n.prec(), 64);
        assert_eq!(n.to_string(), "1.23e+2");

        let n = from_str::<Real>("-7").unwrap();
        assert_eq!(n.prec(), 64);
        assert_eq!(n.to_string(), "-7.");

        let n = from_str::<Real>("0.3").unwrap();
        assert_eq!(n.prec(), 53);
        assert_eq!(n.to_string(), "2.9999999999999999e-1");

        let n = from_str::<Real>("\"0.3\"").unwrap();
        assert_eq!(n.prec(), 53);
        assert_eq!(n.to_string(), "2.9999999999999999e-1");

        let n = from_str::<Real>(r#"{"prec":4,"value":"0.3"}"#).unwrap();
        assert_eq!(n.prec(), 4);
        assert_eq!(n.to_string(), "3.12e-1");

        let n = from_str::<Real>(r#"{"value":"-1.5","prec":8}"#).unwrap();
        assert_eq!(n.prec(), 8);
        assert_eq!(n.to_f64(), -1.5);

        assert!(from_str::<Real>("\"-inf\"").unwrap().is_inf());
        assert!(from_str::<Real>("\"nan\"").unwrap().is_nan());

        assert!(from_str::<Real>("\"abc\"").is_err());
        assert!(from_str::<Real>("true").is_err());
        assert!(from_str::<Real>("null").is_err());
        assert!(from_str::<Real>(r#"{"prec":0,"value":"1"}"#).is_err());
        assert!(from_str::<Real>(r#"{"prec":8}"#).is_err());
        assert!(from_str::<Real>(r#"{"value":"1"}"#).is_err());
        assert!(from_str::<Real>(r#"{"prec":8,"value":"1","exp":2}"#).is_err());
        assert!(from_str::<Real>(r#"{"prec":8,"prec":9,"value":"1"}"#).is_err());
    }

    #[test]
    fn json_round_trip() {
        // precision is restored along with the value
        let n = Real::with_prec(0.1, 16).unwrap();
        let d = from_str::<Real>(&to_string(&n).unwrap()).unwrap();
        assert_eq!(d.prec(), 16);
        assert!(same_value(&d, &n));

        let n = Real::from(1_000_000_000_000_000_000i64);
        let d = from_str::<Real>(&to_string(&n).unwrap()).unwrap();
        assert_eq!(d.prec(), 64);
        assert!(same_value(&d, &n));

        for _ in 0..1000 {
            let f = f64::from_bits(random::<u64>());
            let p = random::<u16>() as i64 % 500 + 1;

            let n = Real::with_prec(f, p).unwrap();
            let d = from_str::<Real>(&to_string(&n).unwrap()).unwrap();

            assert_eq!(d.prec(), p);
            if f.is_nan() {
                assert!(d.is_nan());
            } else {
                assert!(same_value(&d, &n));
                assert_eq!(d.is_sign_negative(), n.is_sign_negative());
            }
        }
    }
}
