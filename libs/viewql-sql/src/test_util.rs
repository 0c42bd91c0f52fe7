// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Test assertions to check SQL statements and parameters.

/// Assert that the given parameters match the expected ones (in order and count).
///
/// # Usage:
/// ```no_run
/// assert_params!(actual_params, expected_param1, expected_param2, ...);
/// ```
///
/// Expected values are compared with [`SQLParam::eq`](crate::SQLParam::eq), so they must have the
/// same type as the bound value (for example `TextParam::from("abc")` for a text parameter).
#[macro_export]
macro_rules! assert_params {
    ($actual_params:expr $(, $expected_param:expr)* $(,)?) => {{
        let actual_params = &$actual_params;
        #[allow(unused_mut)]
        let mut index = 0usize;
        $(
            let actual = actual_params
                .get(index)
                .unwrap_or_else(|| panic!("Missing actual parameter ${}", index + 1));
            let actual_param: &dyn $crate::SQLParam = actual.as_ref();
            let expected = $expected_param;
            assert!(
                $crate::SQLParam::eq(actual_param, &expected),
                "Parameter mismatch at ${}: {:?} != {:?}",
                index + 1,
                actual,
                expected
            );
            index += 1;
        )*
        assert_eq!(actual_params.len(), index, "Extra actual parameters");
    }};
}

/// Assert the statement text and the bound parameters of a `(String, Vec<SQLParamContainer>)`
/// pair, such as the one returned by [`ExpressionBuilder::to_sql`](crate::ExpressionBuilder::to_sql).
#[macro_export]
macro_rules! assert_binding {
    ($actual:expr, $expected_stmt:expr $(, $expected_param:expr)* $(,)?) => {{
        let (actual_stmt, actual_params) = $actual;
        assert_eq!(actual_stmt, $expected_stmt);
        $crate::assert_params!(actual_params $(, $expected_param)*);
    }};
}
