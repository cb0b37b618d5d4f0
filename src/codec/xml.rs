/*
 *  Copyright 2025 Colliery Software
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! XML interchange codec.
//!
//! Export writes a root `<orders>` element with one `<order>` child per
//! record and one sub-element per field, in field declaration order. A
//! missing description becomes an empty element.
//!
//! Import parses strictly: a non-integer id, an unparseable creation date, a
//! missing required field, or broken XML aborts the entire import before any
//! record is merged.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::info;

use super::{export_path, format_timestamp, parse_timestamp};
use crate::dal::DAL;
use crate::error::CodecError;
use crate::models::order::Order;

/// File name of the XML export inside the reports directory.
pub const XML_FILE_NAME: &str = "orders.xml";

const FORMAT: &str = "xml";
const ROOT_TAG: &str = "orders";
const ORDER_TAG: &str = "order";

fn xml_error(e: impl std::fmt::Display) -> CodecError {
    CodecError::Serialize(e.to_string())
}

fn malformed(reason: impl Into<String>) -> CodecError {
    CodecError::malformed(FORMAT, reason)
}

/// Renders the full order set as an XML document.
fn render_orders(orders: &[Order]) -> Result<Vec<u8>, CodecError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new(ROOT_TAG)))
        .map_err(xml_error)?;

    for order in orders {
        writer
            .write_event(Event::Start(BytesStart::new(ORDER_TAG)))
            .map_err(xml_error)?;

        write_field(&mut writer, "id", &order.id.to_string())?;
        write_field(&mut writer, "name", &order.name)?;
        match &order.description {
            Some(description) => write_field(&mut writer, "description", description)?,
            None => writer
                .write_event(Event::Empty(BytesStart::new("description")))
                .map_err(xml_error)?,
        }
        write_field(
            &mut writer,
            "creation_date",
            &format_timestamp(&order.creation_date),
        )?;
        write_field(&mut writer, "status", &order.status)?;

        writer
            .write_event(Event::End(BytesEnd::new(ORDER_TAG)))
            .map_err(xml_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(ROOT_TAG)))
        .map_err(xml_error)?;

    Ok(writer.into_inner())
}

fn write_field(writer: &mut Writer<Vec<u8>>, tag: &str, value: &str) -> Result<(), CodecError> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_error)?;
    Ok(())
}

/// Parses an XML document back into order records.
///
/// Strict: every `<order>` must carry a well-formed integer id, a
/// parseable creation date, and name/status text. The first bad record
/// fails the whole parse.
fn parse_orders(content: &str) -> Result<Vec<Order>, CodecError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut orders = Vec::new();
    let mut in_order = false;
    let mut current_field: Option<String> = None;
    let mut fields: HashMap<String, String> = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag == ORDER_TAG {
                    in_order = true;
                    fields.clear();
                } else if in_order {
                    fields.insert(tag.clone(), String::new());
                    current_field = Some(tag);
                }
            }
            Ok(Event::Empty(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag == ORDER_TAG {
                    // A self-closing order has no fields at all; build_order
                    // rejects it for the missing id.
                    fields.clear();
                    orders.push(build_order(&fields)?);
                } else if in_order {
                    fields.insert(tag, String::new());
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(field) = &current_field {
                    let text = e
                        .unescape()
                        .map_err(|e| malformed(format!("bad text content: {}", e)))?;
                    if let Some(value) = fields.get_mut(field) {
                        value.push_str(&text);
                    }
                }
            }
            Ok(Event::End(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag == ORDER_TAG {
                    orders.push(build_order(&fields)?);
                    in_order = false;
                } else if current_field.as_deref() == Some(tag.as_str()) {
                    current_field = None;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(malformed(format!("XML parse error: {}", e))),
        }
    }

    Ok(orders)
}

fn build_order(fields: &HashMap<String, String>) -> Result<Order, CodecError> {
    let required = |field: &str| {
        fields
            .get(field)
            .ok_or_else(|| malformed(format!("order element is missing <{}>", field)))
    };

    let raw_id = required("id")?;
    let id: i32 = raw_id
        .parse()
        .map_err(|_| malformed(format!("non-integer order id '{}'", raw_id)))?;
    let creation_date = {
        let raw = required("creation_date")?;
        parse_timestamp(raw)
            .map_err(|e| malformed(format!("bad creation_date '{}': {}", raw, e)))?
    };
    let description = match fields.get("description") {
        Some(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    };

    Ok(Order {
        id,
        name: required("name")?.clone(),
        description,
        creation_date,
        status: required("status")?.clone(),
    })
}

/// XML interchange codec.
pub struct XmlCodec<'a> {
    dal: &'a DAL,
    reports_dir: &'a Path,
}

impl<'a> XmlCodec<'a> {
    /// Creates a new XML codec writing into the given reports directory.
    pub fn new(dal: &'a DAL, reports_dir: &'a Path) -> Self {
        Self { dal, reports_dir }
    }

    /// Exports all orders to the XML file and returns its path.
    pub async fn export(&self) -> Result<PathBuf, CodecError> {
        let orders = self.dal.orders().list().await?;
        let bytes = render_orders(&orders)?;

        let path = export_path(self.reports_dir, XML_FILE_NAME)?;
        std::fs::write(&path, bytes)?;

        info!(rows = orders.len(), path = %path.display(), "Wrote XML export");
        Ok(path)
    }

    /// Imports orders from an XML file, merging by id.
    ///
    /// The whole document is parsed before the first merge, so a malformed
    /// file imports nothing. Records absent from the file are left
    /// untouched in the store.
    pub async fn import(&self, path: &Path) -> Result<(), CodecError> {
        let content = std::fs::read_to_string(path)?;
        let orders = parse_orders(&content)?;

        let count = orders.len();
        for order in orders {
            self.dal.orders().upsert(order).await?;
        }

        info!(rows = count, path = %path.display(), "Imported XML export");
        Ok(())
    }
}
