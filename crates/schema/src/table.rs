macro_rules! column_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $column:literal) => {
        $column
    };
}


/// Declares a record type together with its SQL table shape.
///
/// Columns are emitted in declaration order. A field can be mapped
/// to a differently named column with `field as "column"`.
macro_rules! sql_table {
    (
        $name:ident($table:literal) {
            $($field:ident $(as $column:literal)? : $ty:ty,)*
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $(
                pub $field: $ty,
            )*
        }

        impl $crate::sql::Row for $name {
            const TABLE: &'static str = $table;

            const COLUMNS: &'static [&'static str] = &[
                $(
                    column_name!($field $(, $column)?),
                )*
            ];

            fn write_values(&self, out: &mut String) {
                let mut first = true;
                $(
                    if !first {
                        out.push_str(", ");
                    }
                    first = false;
                    $crate::sql::SqlValue::write_sql(&self.$field, out);
                )*
                let _ = first;
            }
        }
    };
}
