//! Khmer display labels for codes and English names found in the source tables.

/// Provinces, English name to Khmer
pub const PROVINCES: [(&str, &str); 25] = [
    ("Phnom Penh", "ភ្នំពេញ"),
    ("Siem Reap", "សៀមរាប"),
    ("Battambang", "បាត់ដំបង"),
    ("Banteay Meanchey", "បន្ទាយមានជ័យ"),
    ("Kampong Cham", "កំពង់ចាម"),
    ("Kampong Chhnang", "កំពង់ឆ្នាំង"),
    ("Kampong Speu", "កំពង់ស្ពឺ"),
    ("Kampong Thom", "កំពង់ធំ"),
    ("Kampot", "កំពត"),
    ("Kandal", "កណ្ដាល"),
    ("Koh Kong", "កោះកុង"),
    ("Kratie", "ក្រចេះ"),
    ("Mondulkiri", "មណ្ឌលគីរី"),
    ("Oddar Meanchey", "ឧត្តរមានជ័យ"),
    ("Pailin", "ប៉ៃលិន"),
    ("Preah Sihanouk", "ព្រះសីហនុ"),
    ("Preah Vihear", "ព្រះវិហារ"),
    ("Prey Veng", "ព្រៃវែង"),
    ("Pursat", "ពោធិ៍សាត"),
    ("Ratanakiri", "រតនគិរី"),
    ("Stung Treng", "ស្ទឹងត្រែង"),
    ("Svay Rieng", "ស្វាយរៀង"),
    ("Takeo", "តាកែវ"),
    ("Tboung Khmum", "ត្បូងឃ្មុំ"),
    ("Kep", "កែប"),
];

pub const GENDERS: [(&str, &str); 2] = [("male", "ប្រុស"), ("female", "ស្រី")];

pub const GENDER_COLORS: [(&str, &str); 2] = [("male", "#4dc3ff"), ("female", "#0077b3")];

/// Trainee scholarship status codes
pub const SCHOLARSHIP_STATUS: [(i64, &str); 16] = [
    (1, "សកម្ម"),
    (0, "អសកម្ម"),
    (3, "កំពុងស្នើសុំ"),
    (2, "របៀបព្រៀង"),
    (4, "រង់ចាំ"),
    (5, "បន្តសិក្សា"),
    (8, "បញ្ចប់ការសិក្សា"),
    (9, "ចេញ"),
    (-3, "បដិសេធ"),
    (-2, "សកម្មតិច"),
    (-8, "ស្តុក"),
    (-9, "លុប"),
    (10, "ចេញមុនពេលរៀន"),
    (11, "ចេញកំឡុងពេលរៀន"),
    (7, "ចេញក្រោយការសិក្សា"),
    (6, "ចេញមុនពេលរៀនខ្វះឯកសារ"),
];

/// Status code to status name, used for staff and partner records
pub const STATUS_NAMES: [(i64, &str); 16] = [
    (1, "ACTIVE"),
    (0, "INACTIVE"),
    (3, "REQUESTING"),
    (2, "DRAFT"),
    (4, "waiting"),
    (5, "RESUME_STUDY"),
    (8, "FINISHED_STUDY"),
    (9, "QUIT"),
    (-3, "REJECTED"),
    (-2, "DISABLED"),
    (-8, "ARCHIVE"),
    (-9, "DELETE"),
    (10, "QUIT_BFORE_COURSE"),
    (11, "QUIT_DURING_COURSE"),
    (7, "QUIT_AFTER_COURSE"),
    (6, "QUIT_NOT_ENOGUH_DOC"),
];

pub const MARITAL_BY_CODE: [(i64, &str); 4] =
    [(1, "នៅលីវ"), (2, "រៀបការ"), (3, "លែងលះ"), (4, "មេម៉ាយ")];

pub const MARITAL_BY_NAME: [(&str, &str); 4] = [
    ("single", "នៅលីវ"),
    ("married", "រៀបការ"),
    ("divorce", "លែងលះ"),
    ("widow", "មេម៉ាយ"),
];

/// Equity card status; the empty code stands for missing data
pub const POVERTY_STATUS: [(&str, &str); 5] = [
    ("NEAR_POOR", "គ្រួសារងាយរងហានិភ័យ"),
    ("NOT_POOR", "មិនមានប័ណ្ណសមធម៍"),
    ("POOR_1", "គ្រួសារមានប័ណ្ណក្រីក្រកម្រិត១"),
    ("POOR_2", "គ្រួសារមានប័ណ្ណក្រីក្រកម្រិត២"),
    ("", "មិនមានទិន្នន័យ"),
];

pub const PARTNER_TYPES: [(i64, &str); 3] = [
    (5, "ជាមួយវិស័យឯកជន"),
    (1, "ក្នុងប្រទេស"),
    (3, "ជាមួយគ្រឹះស្ថានជាតិ"),
];

pub const PARTNER_TYPE_OTHER: &str = "មិនមាន";

pub const VERIFIED: [(i64, &str); 2] = [(0, "រង់ចាំពិនិត្យ"), (1, "បានពិនិត្យ")];

pub fn lookup<K: PartialEq + Copy>(table: &[(K, &'static str)], key: K) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, label)| *label)
}

/// Reverse lookup, label to key
pub fn reverse<K: Copy>(table: &[(K, &'static str)], label: &str) -> Option<K> {
    table.iter().find(|(_, l)| *l == label).map(|(k, _)| *k)
}

pub fn province_khmer(name: &str) -> Option<&'static str> {
    lookup(&PROVINCES, name)
}

/// Khmer province name, or the input unchanged when unknown
pub fn province_label(name: &str) -> String {
    province_khmer(name).map_or_else(|| name.to_string(), str::to_string)
}

pub fn gender_khmer(gender: &str) -> Option<&'static str> {
    let lowered = gender.to_lowercase();
    lookup(&GENDERS, lowered.as_str())
}

pub fn gender_label(gender: &str) -> String {
    gender_khmer(gender).map_or_else(|| gender.to_string(), str::to_string)
}

pub fn gender_color(gender: &str) -> Option<String> {
    let lowered = gender.to_lowercase();
    lookup(&GENDER_COLORS, lowered.as_str()).map(str::to_string)
}

pub fn is_female(gender: &str) -> bool {
    gender.eq_ignore_ascii_case("female")
}

pub fn partner_type_label(code: Option<i64>) -> &'static str {
    code.and_then(|c| lookup(&PARTNER_TYPES, c))
        .unwrap_or(PARTNER_TYPE_OTHER)
}
