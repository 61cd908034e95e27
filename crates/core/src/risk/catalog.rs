//! Fixed catalogue of risk categories the detector knows about.

use serde::{Deserialize, Serialize};

use super::types::Industry;

/// Fixed parameters of one risk category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    /// Base impact on the 1-5 scale.
    pub base_impact: f64,
    /// Base probability on the 1-5 scale.
    pub base_probability: f64,
    /// Currency exposure at maximum impact and probability.
    pub exposure_multiplier: f64,
    pub regulatory: bool,
    pub continuity: bool,
    pub reputational: bool,
    /// Action used for Immediate and High priority recommendations.
    pub urgent_action: &'static str,
    /// Action used for Medium and Low priority recommendations.
    pub routine_action: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    CyberSecurity,
    ProfessionalLiability,
    PropertyDamage,
    BusinessInterruption,
    RegulatoryCompliance,
    EmployeePractices,
    ProductLiability,
    SupplyChain,
    DirectorsAndOfficers,
    Environmental,
}

const CYBER_SECURITY: CategoryProfile = CategoryProfile {
    name: "Cyber Security",
    keywords: &[
        "cyber",
        "data breach",
        "breach",
        "ransomware",
        "hacking",
        "malware",
        "phishing",
        "privacy",
    ],
    base_impact: 4.0,
    base_probability: 3.0,
    exposure_multiplier: 500_000.0,
    regulatory: false,
    continuity: true,
    reputational: true,
    urgent_action: "Bind a standalone cyber policy with breach response, forensics and extortion cover",
    routine_action: "Review cyber hygiene controls and confirm breach response cover at renewal",
};

const PROFESSIONAL_LIABILITY: CategoryProfile = CategoryProfile {
    name: "Professional Liability",
    keywords: &[
        "professional liability",
        "errors and omissions",
        "e&o",
        "malpractice",
        "negligence",
        "professional error",
    ],
    base_impact: 4.0,
    base_probability: 2.0,
    exposure_multiplier: 300_000.0,
    regulatory: false,
    continuity: false,
    reputational: true,
    urgent_action: "Add errors and omissions cover sized to the largest client contract",
    routine_action: "Check contract indemnity clauses against the current errors and omissions limit",
};

const PROPERTY_DAMAGE: CategoryProfile = CategoryProfile {
    name: "Property Damage",
    keywords: &[
        "property damage",
        "fire damage",
        "flood",
        "storm",
        "earthquake",
        "theft",
        "vandalism",
    ],
    base_impact: 3.0,
    base_probability: 2.0,
    exposure_multiplier: 250_000.0,
    regulatory: false,
    continuity: true,
    reputational: false,
    urgent_action: "Re-value insured property and close named-peril gaps such as flood and quake",
    routine_action: "Keep asset schedules current and confirm sums insured at the next renewal",
};

const BUSINESS_INTERRUPTION: CategoryProfile = CategoryProfile {
    name: "Business Interruption",
    keywords: &[
        "business interruption",
        "downtime",
        "outage",
        "operational disruption",
        "shutdown",
        "loss of income",
    ],
    base_impact: 4.0,
    base_probability: 2.0,
    exposure_multiplier: 400_000.0,
    regulatory: false,
    continuity: true,
    reputational: false,
    urgent_action: "Extend business interruption cover with an indemnity period of at least 12 months",
    routine_action: "Test the continuity plan and confirm the indemnity period still fits recovery times",
};

const REGULATORY_COMPLIANCE: CategoryProfile = CategoryProfile {
    name: "Regulatory Compliance",
    keywords: &[
        "regulatory",
        "compliance",
        "gdpr",
        "hipaa",
        "fines",
        "penalties",
        "sanction",
        "audit",
    ],
    base_impact: 4.0,
    base_probability: 3.0,
    exposure_multiplier: 350_000.0,
    regulatory: true,
    continuity: false,
    reputational: true,
    urgent_action: "Commission a compliance gap review and secure regulatory defence cover",
    routine_action: "Track upcoming regulatory changes and schedule an annual compliance review",
};

const EMPLOYEE_PRACTICES: CategoryProfile = CategoryProfile {
    name: "Employee Practices",
    keywords: &[
        "wrongful termination",
        "discrimination",
        "harassment",
        "workplace injury",
        "workers compensation",
        "employee claim",
    ],
    base_impact: 3.0,
    base_probability: 2.0,
    exposure_multiplier: 150_000.0,
    regulatory: false,
    continuity: false,
    reputational: true,
    urgent_action: "Put employment practices liability cover in place and refresh HR policies",
    routine_action: "Refresh HR training and review employment practices cover annually",
};

const PRODUCT_LIABILITY: CategoryProfile = CategoryProfile {
    name: "Product Liability",
    keywords: &["product liability", "product recall", "defect", "bodily injury", "product failure"],
    base_impact: 4.0,
    base_probability: 2.0,
    exposure_multiplier: 450_000.0,
    regulatory: false,
    continuity: false,
    reputational: true,
    urgent_action: "Add product liability and recall expense cover for every shipped product line",
    routine_action: "Keep quality control records and review product liability limits with each new line",
};

const SUPPLY_CHAIN: CategoryProfile = CategoryProfile {
    name: "Supply Chain",
    keywords: &["supply chain", "supplier", "vendor failure", "logistics", "third-party dependency"],
    base_impact: 3.0,
    base_probability: 3.0,
    exposure_multiplier: 200_000.0,
    regulatory: false,
    continuity: true,
    reputational: false,
    urgent_action: "Add contingent business interruption cover naming critical suppliers",
    routine_action: "Map critical suppliers and identify alternates before the next renewal",
};

const DIRECTORS_AND_OFFICERS: CategoryProfile = CategoryProfile {
    name: "Directors and Officers",
    keywords: &[
        "directors and officers",
        "d&o",
        "fiduciary",
        "shareholder",
        "governance",
        "mismanagement",
    ],
    base_impact: 4.0,
    base_probability: 2.0,
    exposure_multiplier: 600_000.0,
    regulatory: true,
    continuity: false,
    reputational: true,
    urgent_action: "Secure D&O cover with side A protection for individual board members",
    routine_action: "Review board governance practices and D&O limits annually",
};

const ENVIRONMENTAL: CategoryProfile = CategoryProfile {
    name: "Environmental",
    keywords: &["pollution", "contamination", "environmental", "hazardous", "emissions"],
    base_impact: 4.0,
    base_probability: 2.0,
    exposure_multiplier: 500_000.0,
    regulatory: true,
    continuity: true,
    reputational: true,
    urgent_action: "Buy pollution legal liability cover and document site remediation plans",
    routine_action: "Audit site handling of hazardous materials and keep remediation plans on file",
};

impl RiskCategory {
    pub const ALL: [RiskCategory; 10] = [
        Self::CyberSecurity,
        Self::ProfessionalLiability,
        Self::PropertyDamage,
        Self::BusinessInterruption,
        Self::RegulatoryCompliance,
        Self::EmployeePractices,
        Self::ProductLiability,
        Self::SupplyChain,
        Self::DirectorsAndOfficers,
        Self::Environmental,
    ];

    pub fn profile(&self) -> &'static CategoryProfile {
        match self {
            Self::CyberSecurity => &CYBER_SECURITY,
            Self::ProfessionalLiability => &PROFESSIONAL_LIABILITY,
            Self::PropertyDamage => &PROPERTY_DAMAGE,
            Self::BusinessInterruption => &BUSINESS_INTERRUPTION,
            Self::RegulatoryCompliance => &REGULATORY_COMPLIANCE,
            Self::EmployeePractices => &EMPLOYEE_PRACTICES,
            Self::ProductLiability => &PRODUCT_LIABILITY,
            Self::SupplyChain => &SUPPLY_CHAIN,
            Self::DirectorsAndOfficers => &DIRECTORS_AND_OFFICERS,
            Self::Environmental => &ENVIRONMENTAL,
        }
    }

    pub fn name(&self) -> &'static str {
        self.profile().name
    }

    /// Impact multiplier for an industry; 1.0 where the industry carries no
    /// particular weight for this category.
    pub fn industry_multiplier(&self, industry: Industry) -> f64 {
        use Industry::*;
        use RiskCategory::*;

        match (*self, industry) {
            (CyberSecurity, FinancialServices) => 1.5,
            (CyberSecurity, Healthcare) => 1.4,
            (CyberSecurity, Technology) => 1.3,
            (CyberSecurity, Retail) => 1.2,
            (ProfessionalLiability, Healthcare) => 1.5,
            (ProfessionalLiability, ProfessionalServices) => 1.4,
            (ProfessionalLiability, FinancialServices) => 1.3,
            (PropertyDamage, Construction) => 1.4,
            (PropertyDamage, Manufacturing) => 1.3,
            (PropertyDamage, Hospitality) => 1.2,
            (PropertyDamage, Retail) => 1.1,
            (BusinessInterruption, Manufacturing) => 1.4,
            (BusinessInterruption, Hospitality) => 1.3,
            (BusinessInterruption, Technology | Retail) => 1.2,
            (RegulatoryCompliance, Healthcare | FinancialServices) => 1.5,
            (RegulatoryCompliance, Technology) => 1.1,
            (EmployeePractices, Hospitality | Construction) => 1.3,
            (EmployeePractices, Retail) => 1.2,
            (ProductLiability, Manufacturing) => 1.5,
            (ProductLiability, Retail) => 1.2,
            (SupplyChain, Manufacturing) => 1.4,
            (SupplyChain, Retail) => 1.3,
            (DirectorsAndOfficers, FinancialServices) => 1.4,
            (DirectorsAndOfficers, Technology) => 1.2,
            (Environmental, Manufacturing) => 1.5,
            (Environmental, Construction) => 1.4,
            _ => 1.0,
        }
    }
}
