// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;
use viewql_sql::{Column, Limit, Offset, OrderBy, OrderByElement, Ordering, Predicate};

use crate::{cast::literal_column, error::CompileError, selection_level::EntityLevel};

const WHERE_ARG: &str = "where";
const ORDER_BY_ARG: &str = "orderBy";
const LIMIT_ARG: &str = "limit";
const OFFSET_ARG: &str = "offset";

/// The filter, sort and paging clauses requested through a node's arguments
#[derive(Debug)]
pub(crate) struct QueryClauses {
    pub predicate: Predicate,
    pub order_by: Option<OrderBy>,
    pub limit: Option<Limit>,
    pub offset: Option<Offset>,
}

impl QueryClauses {
    /// Translate the recognized arguments. Field names are resolved through `level` (so they obey
    /// the same authorization rules as selected fields) and every literal becomes a parameter.
    pub fn from_args(
        args: &IndexMap<String, Value>,
        level: &mut EntityLevel,
    ) -> Result<Self, CompileError> {
        let mut clauses = QueryClauses {
            predicate: Predicate::True,
            order_by: None,
            limit: None,
            offset: None,
        };

        for (name, value) in args {
            match name.as_str() {
                WHERE_ARG => clauses.predicate = where_predicate(value, level)?,
                ORDER_BY_ARG => clauses.order_by = order_by(value, level)?,
                LIMIT_ARG => clauses.limit = non_negative(LIMIT_ARG, value)?.map(Limit),
                OFFSET_ARG => clauses.offset = non_negative(OFFSET_ARG, value)?.map(Offset),
                _ => debug!("Ignoring unsupported argument '{name}'"),
            }
        }

        Ok(clauses)
    }
}

fn where_predicate(value: &Value, level: &mut EntityLevel) -> Result<Predicate, CompileError> {
    match value {
        Value::Null => Ok(Predicate::True),
        Value::Object(conditions) => conditions.iter().try_fold(
            Predicate::True,
            |predicate, (field_name, condition)| -> Result<Predicate, CompileError> {
                Ok(Predicate::and(
                    predicate,
                    field_predicate(field_name, condition, level)?,
                ))
            },
        ),
        _ => Err(CompileError::Validation(format!(
            "'{WHERE_ARG}' must be an object"
        ))),
    }
}

fn field_predicate(
    field_name: &str,
    condition: &Value,
    level: &mut EntityLevel,
) -> Result<Predicate, CompileError> {
    match condition {
        Value::Object(operators) => operators_predicate(field_name, operators, level),
        Value::Array(_) => Err(CompileError::Validation(format!(
            "Use the 'in' operator to match '{field_name}' against a list"
        ))),
        // Equality (`null` means `IS NULL`)
        _ => Ok(Predicate::eq(
            level.column(field_name)?,
            literal_column(condition),
        )),
    }
}

fn operators_predicate(
    field_name: &str,
    operators: &Map<String, Value>,
    level: &mut EntityLevel,
) -> Result<Predicate, CompileError> {
    let mut predicate = Predicate::True;

    for (operator, operand) in operators {
        let column = level.column(field_name)?;

        let operator_predicate = match operator.as_str() {
            "eq" => Predicate::eq(column, literal_column(operand)),
            "neq" => Predicate::neq(column, literal_column(operand)),
            "gt" => Predicate::Gt(column, scalar_operand(field_name, operator, operand)?),
            "gte" => Predicate::Gte(column, scalar_operand(field_name, operator, operand)?),
            "lt" => Predicate::Lt(column, scalar_operand(field_name, operator, operand)?),
            "lte" => Predicate::Lte(column, scalar_operand(field_name, operator, operand)?),
            "in" => match operand {
                Value::Array(elements) if !elements.is_empty() => Predicate::in_list(
                    column,
                    elements
                        .iter()
                        .map(|element| scalar_operand(field_name, operator, element))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                _ => {
                    return Err(CompileError::Validation(format!(
                        "'in' for '{field_name}' expects a non-empty list"
                    )));
                }
            },
            "isNull" => match operand {
                Value::Bool(true) => Predicate::IsNull(column),
                Value::Bool(false) => Predicate::IsNotNull(column),
                _ => {
                    return Err(CompileError::Validation(format!(
                        "'isNull' for '{field_name}' expects a boolean"
                    )));
                }
            },
            _ => {
                return Err(CompileError::Validation(format!(
                    "Unknown operator '{operator}' for '{field_name}'"
                )));
            }
        };

        predicate = Predicate::and(predicate, operator_predicate);
    }

    Ok(predicate)
}

/// An operand that must be a non-null scalar
fn scalar_operand(
    field_name: &str,
    operator: &str,
    operand: &Value,
) -> Result<Column, CompileError> {
    match operand {
        Value::Null | Value::Array(_) | Value::Object(_) => Err(CompileError::Validation(
            format!("'{operator}' for '{field_name}' expects a scalar value"),
        )),
        _ => Ok(literal_column(operand)),
    }
}

fn order_by(value: &Value, level: &mut EntityLevel) -> Result<Option<OrderBy>, CompileError> {
    let elements_text: Vec<&str> = match value {
        Value::Null => vec![],
        Value::String(element_text) => vec![element_text.as_str()],
        Value::Array(elements_text) => elements_text
            .iter()
            .map(|element_text| {
                element_text.as_str().ok_or_else(|| {
                    CompileError::Validation(format!(
                        "'{ORDER_BY_ARG}' must be a string or a list of strings"
                    ))
                })
            })
            .collect::<Result<_, _>>()?,
        _ => {
            return Err(CompileError::Validation(format!(
                "'{ORDER_BY_ARG}' must be a string or a list of strings"
            )));
        }
    };

    if elements_text.is_empty() {
        return Ok(None);
    }

    let elements = elements_text
        .into_iter()
        .map(|element_text| -> Result<OrderByElement, CompileError> {
            let (field_name, ordering) = parse_ordering(element_text);
            Ok(OrderByElement::new(level.column(field_name)?, ordering))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(OrderBy(elements)))
}

/// `field`, `field_ASC` or `field_DESC`
fn parse_ordering(element_text: &str) -> (&str, Ordering) {
    if let Some(field_name) = element_text.strip_suffix("_DESC") {
        (field_name, Ordering::Desc)
    } else if let Some(field_name) = element_text.strip_suffix("_ASC") {
        (field_name, Ordering::Asc)
    } else {
        (element_text, Ordering::Asc)
    }
}

fn non_negative(name: &str, value: &Value) -> Result<Option<i64>, CompileError> {
    match value {
        Value::Null => Ok(None),
        _ => match value.as_i64() {
            Some(v) if v >= 0 => Ok(Some(v)),
            _ => Err(CompileError::Validation(format!(
                "'{name}' must be a non-negative integer"
            ))),
        },
    }
}
