use crate::access::UploadAuthorizer;
use crate::config::RiskConfig;
use crate::error::RiskError;
use crate::record::{CanonicalRecord, RawTable};
use crate::summary::{self, AreaSummary};
use crate::table::build_canonical_with;
use log::{info, warn};

/// One analysis session over a canonical risk table
///
/// The records are fixed once built. A re-upload swaps in a completely new
/// table or leaves the current one untouched; there is no partial update.
#[derive(Clone, Debug)]
pub struct AnalysisSession {
    config: RiskConfig,
    records: Vec<CanonicalRecord>,
}

impl AnalysisSession {
    pub fn new(raw: &RawTable, config: RiskConfig) -> Result<Self, RiskError> {
        config.validate()?;
        let records = build_canonical_with(raw, &config)?;
        Ok(Self { config, records })
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn areas(&self) -> Vec<String> {
        summary::area_names(&self.records)
    }

    pub fn area(&self, area: &str) -> Vec<&CanonicalRecord> {
        summary::filter_by_area(&self.records, area)
    }

    pub fn area_summary(&self, area: &str) -> AreaSummary {
        summary::summarize_area(&self.records, area, &self.config.average)
    }

    pub fn summaries(&self) -> Vec<AreaSummary> {
        summary::summarize_by_area(&self.records, &self.config.average)
    }

    /// Replaces the table with one built from `raw`
    ///
    /// # Errors
    /// * `RiskError::Unauthorized` if `authorizer` rejects `secret`
    /// * any error from building the new table
    ///
    /// The current records are kept on every error path.
    pub fn replace_upload(
        &mut self,
        authorizer: &dyn UploadAuthorizer,
        secret: &str,
        raw: &RawTable,
    ) -> Result<(), RiskError> {
        if !authorizer.authorize(secret) {
            warn!("re-upload rejected by authorizer");
            return Err(RiskError::Unauthorized);
        }

        let records = build_canonical_with(raw, &self.config)?;
        info!(
            "session table replaced: {} -> {} records",
            self.records.len(),
            records.len()
        );
        self.records = records;
        Ok(())
    }
}
