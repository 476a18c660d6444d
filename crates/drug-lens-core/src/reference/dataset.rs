//! Built-in verified dataset.
//!
//! Order matters: lookup returns the first matching key in this order.

use crate::models::DrugRecord;

pub fn builtin_records() -> Vec<DrugRecord> {
    vec![
        DrugRecord::new(
            "parol",
            "Parol 500 mg Tablet",
            "Paracetamol",
            "Used for mild to moderate pain relief and fever reduction.",
            "Do not exceed 4 grams per day. Consult a doctor if you have liver issues.",
        ),
        DrugRecord::new(
            "arveles",
            "Arveles 25 mg Film Tablet",
            "Dexketoprofen",
            "Used for musculoskeletal pain, menstrual pain, and toothache.",
            "May cause stomach upset, should be taken on a full stomach.",
        ),
        DrugRecord::new(
            "aspirin",
            "Aspirin 100 mg",
            "Acetylsalicylic Acid",
            "Used as a blood thinner and pain reliever.",
            "Should not be used by those with bleeding disorders.",
        ),
        DrugRecord::new(
            "calpol",
            "Calpol 6 Plus Suspension",
            "Paracetamol",
            "Pain and fever relief for children.",
            "Contains paracetamol. Check dosage by age.",
        ),
    ]
}
