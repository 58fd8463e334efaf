/*!
# Riskboard

Column detection and risk classification for mining-safety risk spreadsheets.

## Overview

Risk matrices arrive as spreadsheets whose column names vary from file to file
("Área", "Area de Trabajo", "Prob (1-5)", "Probabilidad", ...). This crate works
out which column plays which role, derives a numeric risk score for every row,
buckets it into Low / Medium / High / Unknown and hands back a canonical table
for dashboards and exports to consume.

## Pipeline

1. **Load** - `loader` turns a CSV or XLSX file into a `RawTable`
2. **Detect columns** - `columns` normalizes headers and matches them against a
   role → keyword table
3. **Build** - `table` produces one `CanonicalRecord` per row, failing fast when
   no Area column exists
4. **Summarize** - `summary` groups records by area with mean scores and their
   classification
5. **Export** - `downloader` writes the canonical table back to CSV or XLSX

## Modules

- **record**: raw cells, raw tables and canonical records
- **columns**: header normalization and role detection
- **risk**: risk score derivation and the two threshold scales
- **config**: threshold configuration loaded from JSON
- **table**: canonical table construction
- **summary**: per-area indicators and distributions
- **loader**: CSV/XLSX import
- **downloader**: CSV/XLSX export
- **access**: upload authorization capability
- **session**: a canonical table held for one analysis run

## Features

- `excel`: XLSX import (calamine) and export (rust_xlsxwriter)
*/

pub mod access;
pub mod columns;
pub mod config;
pub mod downloader;
pub mod error;
pub mod loader;
pub mod record;
pub mod risk;
pub mod session;
pub mod summary;
pub mod table;

pub use columns::{ColumnIndex, ColumnMap, Role, find_column, normalize_name};
pub use config::RiskConfig;
pub use error::RiskError;
pub use record::{CanonicalRecord, Classification, RawTable, RawValue};
pub use risk::{classify_average, classify_row, derive_risk_score};
pub use table::{build_canonical, build_canonical_with};
