//! End-to-end checks of the table construction, see `tests/`.
