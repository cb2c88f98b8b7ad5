//! Keyword tables. All lookups take an uppercase word.
//!
//! Only reserved words live here: ordinary column names such as `name`,
//! `status` or `date` must stay identifiers so they get quoted.

/// Reserved words printed bare and uppercased.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "ADD"
            | "ALL"
            | "ALTER"
            | "ANALYZE"
            | "AND"
            | "ANY"
            | "AS"
            | "ASC"
            | "AUTOINCREMENT"
            | "AUTO_INCREMENT"
            | "BEGIN"
            | "BETWEEN"
            | "BIGINT"
            | "BINARY"
            | "BLOB"
            | "BOOL"
            | "BOOLEAN"
            | "BY"
            | "CASCADE"
            | "CASE"
            | "CAST"
            | "CHAR"
            | "CHECK"
            | "COLLATE"
            | "COLUMN"
            | "COMMIT"
            | "CONFLICT"
            | "CONSTRAINT"
            | "CONVERT"
            | "CREATE"
            | "CROSS"
            | "CURRENT_DATE"
            | "CURRENT_TIME"
            | "CURRENT_TIMESTAMP"
            | "DATABASE"
            | "DATETIME"
            | "DECIMAL"
            | "DEFAULT"
            | "DEFERRED"
            | "DELETE"
            | "DESC"
            | "DESCRIBE"
            | "DISTINCT"
            | "DIV"
            | "DO"
            | "DOUBLE"
            | "DROP"
            | "DUPLICATE"
            | "ELSE"
            | "END"
            | "ESCAPE"
            | "EXCEPT"
            | "EXCLUSIVE"
            | "EXISTS"
            | "EXPLAIN"
            | "FALSE"
            | "FLOAT"
            | "FOR"
            | "FORCE"
            | "FOREIGN"
            | "FROM"
            | "FULL"
            | "GLOB"
            | "GROUP"
            | "HAVING"
            | "IF"
            | "IGNORE"
            | "IMMEDIATE"
            | "IN"
            | "INDEX"
            | "INNER"
            | "INSERT"
            | "INT"
            | "INTEGER"
            | "INTERSECT"
            | "INTERVAL"
            | "INTO"
            | "IS"
            | "ISNULL"
            | "JOIN"
            | "KEY"
            | "LEFT"
            | "LIKE"
            | "LIMIT"
            | "LOCK"
            | "MATCH"
            | "MEDIUMINT"
            | "MOD"
            | "NATURAL"
            | "NOT"
            | "NOTHING"
            | "NOTNULL"
            | "NULL"
            | "NUMERIC"
            | "OFFSET"
            | "ON"
            | "OR"
            | "ORDER"
            | "OUTER"
            | "OVER"
            | "PARTITION"
            | "PRAGMA"
            | "PRIMARY"
            | "REAL"
            | "RECURSIVE"
            | "REFERENCES"
            | "REGEXP"
            | "RELEASE"
            | "RENAME"
            | "REPLACE"
            | "RESTRICT"
            | "RETURNING"
            | "RIGHT"
            | "RLIKE"
            | "ROLLBACK"
            | "SAVEPOINT"
            | "SELECT"
            | "SET"
            | "SHARE"
            | "SHOW"
            | "SIGNED"
            | "SMALLINT"
            | "SOME"
            | "START"
            | "TABLE"
            | "TEMP"
            | "TEMPORARY"
            | "TEXT"
            | "THEN"
            | "TINYINT"
            | "TO"
            | "TRANSACTION"
            | "TRIGGER"
            | "TRUE"
            | "TRUNCATE"
            | "UNION"
            | "UNIQUE"
            | "UNSIGNED"
            | "UPDATE"
            | "USE"
            | "USING"
            | "VACUUM"
            | "VALUES"
            | "VARCHAR"
            | "VIEW"
            | "WHEN"
            | "WHERE"
            | "WINDOW"
            | "WITH"
            | "XOR"
    )
}

/// Words that may open a statement.
#[must_use]
pub fn is_statement_keyword(word: &str) -> bool {
    matches!(
        word,
        "ALTER"
            | "ANALYZE"
            | "BEGIN"
            | "COMMIT"
            | "CREATE"
            | "DELETE"
            | "DESC"
            | "DESCRIBE"
            | "DROP"
            | "EXPLAIN"
            | "INSERT"
            | "PRAGMA"
            | "RELEASE"
            | "REPLACE"
            | "ROLLBACK"
            | "SAVEPOINT"
            | "SELECT"
            | "SET"
            | "SHOW"
            | "START"
            | "TRUNCATE"
            | "UPDATE"
            | "USE"
            | "VACUUM"
            | "VALUES"
            | "WITH"
    )
}

/// Keywords that behave like values when spacing operators: `a=NULL`,
/// `CASE .. END=1`.
#[must_use]
pub fn is_value_keyword(word: &str) -> bool {
    matches!(
        word,
        "NULL" | "TRUE" | "FALSE" | "CURRENT_DATE" | "CURRENT_TIME" | "CURRENT_TIMESTAMP" | "END"
    )
}

/// Keywords that are always function calls when followed by `(`.
#[must_use]
pub fn is_call_keyword(word: &str) -> bool {
    matches!(
        word,
        "CAST"
            | "CONVERT"
            | "CHAR"
            | "VARCHAR"
            | "DECIMAL"
            | "NUMERIC"
            | "INT"
            | "INTEGER"
            | "BIGINT"
            | "SMALLINT"
            | "TINYINT"
            | "MEDIUMINT"
            | "FLOAT"
            | "DOUBLE"
            | "BINARY"
            | "DATETIME"
            | "CURRENT_TIMESTAMP"
    )
}

/// Keywords that are function calls only when written directly against
/// their `(`, e.g. `IF(a,b,c)` versus `IF NOT EXISTS`, or `REPLACE(s,a,b)`
/// versus `REPLACE INTO`.
#[must_use]
pub fn is_adjacent_call_keyword(word: &str) -> bool {
    matches!(
        word,
        "IF" | "REPLACE" | "LEFT" | "RIGHT" | "MOD" | "INSERT" | "MATCH" | "TRUNCATE"
    )
}

/// Keywords after which a following `name(` is a table with a column list
/// rather than a function call.
#[must_use]
pub fn introduces_table(word: &str) -> bool {
    matches!(word, "INTO" | "TABLE" | "EXISTS" | "REFERENCES" | "VIEW")
}

/// Keywords that cannot end a statement.
#[must_use]
pub fn is_dangling(word: &str) -> bool {
    matches!(
        word,
        "AND"
            | "AS"
            | "BETWEEN"
            | "BY"
            | "CASE"
            | "ELSE"
            | "FROM"
            | "HAVING"
            | "IN"
            | "INTO"
            | "IS"
            | "JOIN"
            | "LIKE"
            | "LIMIT"
            | "NOT"
            | "OFFSET"
            | "ON"
            | "OR"
            | "SELECT"
            | "SET"
            | "THEN"
            | "UNION"
            | "USING"
            | "VALUES"
            | "WHEN"
            | "WHERE"
    )
}

/// Units accepted after `INTERVAL <expr>`.
#[must_use]
pub fn is_interval_unit(word: &str) -> bool {
    matches!(
        word,
        "MICROSECOND"
            | "SECOND"
            | "MINUTE"
            | "HOUR"
            | "DAY"
            | "WEEK"
            | "MONTH"
            | "QUARTER"
            | "YEAR"
    )
}

/// Charset names recognized in `_charset'literal'` introducers.
#[must_use]
pub fn is_charset(word: &str) -> bool {
    matches!(
        word,
        "UTF8MB4"
            | "UTF8MB3"
            | "UTF8"
            | "UTF16LE"
            | "UTF16"
            | "UTF32"
            | "UCS2"
            | "LATIN1"
            | "ASCII"
            | "BINARY"
            | "GBK"
            | "GB18030"
            | "BIG5"
            | "SJIS"
            | "EUCJPMS"
    )
}
