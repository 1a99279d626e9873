use crate::{
    record::{Record, Slot},
    schema::{LeafKind, Schema},
    value::Value,
};
use chrono::{NaiveDate, NaiveDateTime};

pub(crate) const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

///
/// Nested
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Nested {
    pub(crate) name: String,
    pub(crate) count: i64,
}

impl Record for Nested {
    fn field(&self, name: &str) -> Slot<'_> {
        match name {
            "Name" => Slot::value(self.name.as_str()),
            "Count" => Slot::value(self.count),
            _ => Slot::Missing,
        }
    }
}

///
/// Mock
///
/// One field per leaf category the filter pipeline distinguishes.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Mock {
    pub(crate) bool_prop: bool,
    pub(crate) nullable_bool_prop: Option<bool>,
    pub(crate) int_prop: i32,
    pub(crate) nullable_int_prop: Option<i32>,
    pub(crate) long_prop: i64,
    pub(crate) enum_prop: usize,
    pub(crate) string_prop: Option<String>,
    pub(crate) date_time_prop: NaiveDateTime,
    pub(crate) nullable_date_time_prop: Option<NaiveDateTime>,
    pub(crate) nested_prop: Option<Nested>,
    pub(crate) array_prop: Vec<NaiveDateTime>,
    pub(crate) children: Vec<Nested>,
}

impl Record for Mock {
    fn field(&self, name: &str) -> Slot<'_> {
        match name {
            "BoolProp" => Slot::value(self.bool_prop),
            "NullableBoolProp" => Slot::value(self.nullable_bool_prop),
            "IntProp" => Slot::value(self.int_prop),
            "NullableIntProp" => Slot::value(self.nullable_int_prop),
            "LongProp" => Slot::value(self.long_prop),
            "EnumProp" => Slot::Value(
                DAYS.get(self.enum_prop)
                    .map_or(Value::Null, |day| Value::Enum((*day).to_string())),
            ),
            "StringProp" => Slot::value(self.string_prop.clone()),
            "DateTimeProp" => Slot::value(self.date_time_prop),
            "NullableDateTimeProp" => Slot::value(self.nullable_date_time_prop),
            "NestedProp" => Slot::record(self.nested_prop.as_ref()),
            "ArrayProp" => Slot::values(self.array_prop.iter().copied()),
            "Children" => Slot::records(&self.children),
            _ => Slot::Missing,
        }
    }
}

pub(crate) fn nested_schema() -> Schema {
    Schema::builder("Nested")
        .text("Name")
        .int("Count")
        .build()
        .expect("nested schema is valid")
}

pub(crate) fn mock_schema() -> Schema {
    Schema::builder("Mock")
        .bool("BoolProp")
        .nullable_bool("NullableBoolProp")
        .int("IntProp")
        .nullable_int("NullableIntProp")
        .int("LongProp")
        .enumeration("EnumProp", DAYS)
        .nullable_text("StringProp")
        .date_time("DateTimeProp")
        .nullable_date_time("NullableDateTimeProp")
        .record("NestedProp", nested_schema())
        .list("ArrayProp", LeafKind::DateTime)
        .records("Children", nested_schema())
        .build()
        .expect("mock schema is valid")
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

pub(crate) fn child(name: &str, count: i64) -> Nested {
    Nested {
        name: name.to_string(),
        count,
    }
}
