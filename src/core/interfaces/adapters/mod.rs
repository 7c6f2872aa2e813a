mod compliance_judge;
mod logo_detector;

pub use compliance_judge::ComplianceJudge;
pub use logo_detector::LogoDetector;
