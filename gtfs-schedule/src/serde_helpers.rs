//! Serde representations of the field value types
//!
//! Dates are carried as the unix timestamp of their midnight (UTC) and times
//! as their number of seconds since midnight of the service day, codes as
//! numbers, colors and currencies as their text form.
use crate::types::{Color, CurrencyCode, Date, Enum, Time};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_unix())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        Date::from_unix(seconds)
            .ok_or_else(|| de::Error::custom(format!("timestamp {} is out of range", seconds)))
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.seconds())
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Time::from_seconds)
    }
}

impl<const L: u16, const U: u16> Serialize for Enum<L, U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.value())
    }
}

impl<'de, const L: u16, const U: u16> Deserialize<'de> for Enum<L, U> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u16::deserialize(deserializer)?;
        Enum::new(value.into()).map_err(de::Error::custom)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::types::*;
    use serde_json::json;

    #[test]
    fn numeric_wire() {
        let date = Date::from_ymd(2016, 5, 1).unwrap();
        assert_eq!(serde_json::to_value(date).unwrap(), json!(1_462_060_800));
        assert_eq!(serde_json::from_value::<Date>(json!(1_462_060_800)).unwrap(), date);

        let time: Time = "25:34:22".parse().unwrap();
        assert_eq!(serde_json::to_value(time).unwrap(), json!(92_062));
        assert_eq!(serde_json::from_value::<Time>(json!(92_062)).unwrap(), time);
    }

    #[test]
    fn codes_and_text() {
        assert_eq!(serde_json::to_value(STATION).unwrap(), json!(1));
        assert!(serde_json::from_value::<LocationType>(json!(7)).is_err());
        assert_eq!(serde_json::to_value(Color::new(0, 136, 204)).unwrap(), json!("0088CC"));
        assert_eq!(
            serde_json::from_value::<CurrencyCode>(json!("chf")).unwrap().as_str(),
            "CHF"
        );
    }
}
