use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::sanitize_stem;

const SAMPLE_TOPICS: &[&str] = &[
    "Non-Disclosure Agreement",
    "Mutual Non-Disclosure Agreement",
    "Employment Agreement",
    "Independent Contractor Agreement",
    "Service Level Agreement",
    "Master Services Agreement",
    "Software License Agreement",
    "End User License Agreement",
    "Data Processing Addendum",
    "Privacy Policy",
    "Terms of Service",
    "Consulting Agreement",
    "Sales Agreement",
    "Purchase Agreement",
    "Lease Agreement",
    "Rental Agreement",
    "Partnership Agreement",
    "Shareholders Agreement",
    "Founders Agreement",
    "Loan Agreement",
    "Promissory Note",
    "Letter of Intent",
    "Memorandum of Understanding",
    "Franchise Agreement",
    "Agency Agreement",
    "Distribution Agreement",
    "Reseller Agreement",
    "Non-Compete Agreement",
    "Non-Solicitation Agreement",
    "IP Assignment Agreement",
    "Work for Hire Agreement",
    "SaaS Agreement",
    "Website Terms of Use",
    "Cookie Policy",
    "Acceptable Use Policy",
    "Return and Refund Policy",
    "Warranty Policy",
    "Arbitration Agreement",
    "Settlement Agreement",
    "Release of Claims",
    "Joint Venture Agreement",
    "Asset Purchase Agreement",
    "Stock Purchase Agreement",
    "Consulting SOW",
    "Professional Services SOW",
    "Change Order",
    "Employment Offer Letter",
    "Employee Handbook Acknowledgment",
    "Commission Agreement",
    "Severance Agreement",
    "Termination Notice",
    "Demand Letter",
    "Cease and Desist Letter",
    "DMCA Takedown Notice",
    "Trademark License",
    "Patent License",
    "Copyright License",
    "Open Source License Notice",
    "At-Will Employment Notice",
    "Internship Agreement",
    "Volunteer Agreement",
    "Confidentiality Policy",
    "Security Policy",
    "DPA Annex: Subprocessors",
    "GDPR Data Subject Request Form",
    "CCPA Notice",
    "HIPAA BAA",
    "FERPA Consent",
    "Joint Controller Agreement",
    "Standard Contractual Clauses",
    "International Data Transfer Addendum",
    "Marketing Consent Form",
    "Photo/Video Release",
    "Event Waiver",
    "Media NDA",
    "Talent Release",
    "Influencer Agreement",
    "Affiliate Agreement",
    "Referral Agreement",
    "Managed Services Agreement",
    "Support and Maintenance Policy",
    "Uptime SLA",
    "Bug Bounty Policy",
    "Incident Response Policy",
    "Business Continuity Plan Acknowledgment",
    "Subcontractor Agreement",
    "Supplier Agreement",
    "Manufacturing Agreement",
    "Quality Assurance Agreement",
    "Non-Circumvention Agreement",
    "Loan Security Agreement",
    "Guaranty Agreement",
    "Board Consent",
    "Shareholder Consent",
    "Bylaws",
    "Operating Agreement",
    "Certificate of Incorporation",
    "ESOP Plan Summary",
    "Stock Option Grant Notice",
    "Advisor Agreement",
    "Consulting Confidentiality Rider",
    "Export Compliance Policy",
    "KYC Questionnaire",
    "AML Policy",
    "Whistleblower Policy",
];

const TEMPLATE_BODY: &str = "This is a sample {title}.\n\n\
Purpose: Provide a baseline legal template for {title} usage.\n\n\
Key Sections:\n\
1. Parties and Definitions\n\
2. Term and Termination\n\
3. Confidentiality and IP\n\
4. Payment and Consideration (if applicable)\n\
5. Warranties and Disclaimers\n\
6. Limitation of Liability\n\
7. Governing Law and Dispute Resolution\n\n\
Notes: Replace placeholders with actual party names, dates, and terms.";

/// Populate `dir` with a sample corpus of `count` templates drawn from a
/// fixed topic list (topics repeat when `count` exceeds the list). Skips
/// generation entirely when the directory already holds at least `count`
/// `.txt` files, and never overwrites an existing file. Returns the number
/// of templates created.
pub fn seed_corpus(dir: &Path, count: usize) -> Result<usize> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating template directory {}", dir.display()))?;

    let existing = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("txt"))
        .count();
    if existing >= count {
        info!(existing, "corpus already seeded, nothing to generate");
        return Ok(0);
    }

    let mut created = 0;
    for idx in 1..=count {
        let title = SAMPLE_TOPICS[(idx - 1) % SAMPLE_TOPICS.len()];
        let filename = format!("{idx:03}_{}.txt", sanitize_stem(title));
        let path = dir.join(filename);
        if path.exists() {
            continue;
        }
        std::fs::write(&path, TEMPLATE_BODY.replace("{title}", title))
            .with_context(|| format!("writing {}", path.display()))?;
        created += 1;
    }

    info!(created, dir = %dir.display(), "seeded sample corpus");
    Ok(created)
}
