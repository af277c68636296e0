//! Tour input validation.
//!
//! Request bodies arrive as untyped JSON. [`parse_create`] and
//! [`parse_update`] check the shape of the body (presence, JSON type, date
//! format) and then run the `validator` content rules on the typed result, so
//! a body is either turned into a [`CreateTour`] / [`UpdateTour`] value or
//! rejected with a [`CoreError::Validation`] naming every offending field.
//!
//! Two behaviours are kept deliberately loose:
//! - unknown fields are ignored;
//! - `startDate` is not required to precede `endDate`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::error::{CoreError, FieldError};
use crate::types::Date;

/// Entity label used in not-found errors and log lines.
pub const ENTITY: &str = "Tour";

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_START_DATE: &str = "startDate";
pub const FIELD_END_DATE: &str = "endDate";

/// Pseudo-field reported when the body itself is not a JSON object.
pub const FIELD_BODY: &str = "body";

const MSG_REQUIRED: &str = "is required";
const MSG_NOT_STRING: &str = "must be a string";
const MSG_NOT_DATE: &str = "must be an ISO 8601 date string";

// ---------------------------------------------------------------------------
// Validated value objects
// ---------------------------------------------------------------------------

/// A validated request to create a tour.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CreateTour {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub location: String,
    pub start_date: Date,
    pub end_date: Date,
}

/// A validated partial patch. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UpdateTour {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub location: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl UpdateTour {
    /// True when the patch would not change any column.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Validate a create body.
pub fn parse_create(body: &Value) -> Result<CreateTour, CoreError> {
    let mut fields = BodyFields::new(body)?;

    let name = fields.required_string(FIELD_NAME);
    let description = fields.optional_string(FIELD_DESCRIPTION);
    let location = fields.required_string(FIELD_LOCATION);
    let start_date = fields.required_date(FIELD_START_DATE);
    let end_date = fields.required_date(FIELD_END_DATE);

    // A `required_*` reader that yields `None` has always recorded an error.
    let (Some(name), Some(location), Some(start_date), Some(end_date)) =
        (name, location, start_date, end_date)
    else {
        return Err(fields.into_error());
    };
    fields.finish()?;

    let input = CreateTour {
        name,
        description,
        location,
        start_date,
        end_date,
    };
    input.validate().map_err(into_core_error)?;
    Ok(input)
}

/// Validate an update body. An empty object is a valid, empty patch.
pub fn parse_update(body: &Value) -> Result<UpdateTour, CoreError> {
    let mut fields = BodyFields::new(body)?;

    let input = UpdateTour {
        name: fields.optional_string(FIELD_NAME),
        description: fields.optional_string(FIELD_DESCRIPTION),
        location: fields.optional_string(FIELD_LOCATION),
        start_date: fields.optional_date(FIELD_START_DATE),
        end_date: fields.optional_date(FIELD_END_DATE),
    };

    fields.finish()?;
    input.validate().map_err(into_core_error)?;
    Ok(input)
}

/// Local date-time layouts accepted when no UTC offset is given. `%.f`
/// makes the fractional seconds optional.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO 8601 date.
///
/// Accepts `YYYY-MM-DD`, the basic form `YYYYMMDD`, an RFC 3339 timestamp
/// (reduced to its UTC calendar date), or a date-time without an offset
/// (reduced to its own calendar date).
pub fn parse_date(raw: &str) -> Option<Date> {
    if let Ok(date) = raw.parse::<Date>() {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.date());
    }
    Date::parse_from_str(raw, "%Y%m%d").ok()
}

/// Field-by-field reader over a JSON object that accumulates errors instead
/// of stopping at the first one.
struct BodyFields<'a> {
    body: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> BodyFields<'a> {
    fn new(body: &'a Value) -> Result<Self, CoreError> {
        let body = body
            .as_object()
            .ok_or_else(|| CoreError::invalid_field(FIELD_BODY, "must be a JSON object"))?;
        Ok(Self {
            body,
            errors: Vec::new(),
        })
    }

    /// JSON `null` counts as absent.
    fn lookup(&self, field: &str) -> Option<&'a Value> {
        self.body.get(field).filter(|v| !v.is_null())
    }

    fn reject(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.lookup(field)? {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.reject(field, MSG_NOT_STRING);
                None
            }
        }
    }

    fn required_string(&mut self, field: &str) -> Option<String> {
        if self.lookup(field).is_none() {
            self.reject(field, MSG_REQUIRED);
            return None;
        }
        self.optional_string(field)
    }

    fn optional_date(&mut self, field: &str) -> Option<Date> {
        let parsed = match self.lookup(field)? {
            Value::String(s) => parse_date(s),
            _ => None,
        };
        if parsed.is_none() {
            self.reject(field, MSG_NOT_DATE);
        }
        parsed
    }

    fn required_date(&mut self, field: &str) -> Option<Date> {
        if self.lookup(field).is_none() {
            self.reject(field, MSG_REQUIRED);
            return None;
        }
        self.optional_date(field)
    }

    fn into_error(self) -> CoreError {
        CoreError::Validation(self.errors)
    }

    fn finish(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self.errors))
        }
    }
}

/// Flatten `validator` output into field errors, sorted by field name.
fn into_core_error(errors: ValidationErrors) -> CoreError {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    CoreError::Validation(fields)
}
