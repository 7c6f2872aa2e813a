mod compliance_orchestrator;

pub use compliance_orchestrator::ComplianceOrchestrator;
