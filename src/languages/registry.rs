//! Language registry: single source of truth for every language the
//! translation service accepts.
//!
//! The table mirrors the language list published by the web frontend. It is
//! initialized once behind a `OnceLock` and is read-only afterwards, so
//! concurrent lookups need no synchronization.

use std::sync::OnceLock;

/// One supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageConfig {
    /// ISO 639-1/639-3 style code understood by the service (e.g. "en", "ceb")
    pub code: &'static str,

    /// English display name (e.g. "English", "Cebuano")
    pub name: &'static str,
}

/// Global language registry singleton.
///
/// Initialized lazily on first access and immutable thereafter.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: LANGUAGES
                .iter()
                .map(|&(code, name)| LanguageConfig { code, name })
                .collect(),
        })
    }

    /// Look up a language by its service code. Codes are case sensitive:
    /// "zh-CN" is in the table, "zh-cn" is not.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Look up a language by its English display name, ignoring case.
    /// When two codes share a name (Hebrew is both "he" and "iw") the
    /// first table entry wins.
    pub fn get_by_name(&self, name: &str) -> Option<&LanguageConfig> {
        self.languages
            .iter()
            .find(|lang| lang.name.eq_ignore_ascii_case(name))
    }

    /// Resolve an identifier that may be either a code or a display name.
    pub fn resolve(&self, id: &str) -> Option<&LanguageConfig> {
        self.get_by_code(id).or_else(|| self.get_by_name(id))
    }

    /// All languages, in table order.
    pub fn list_all(&self) -> &[LanguageConfig] {
        &self.languages
    }
}

/// The language table as shipped by the service frontend.
///
/// The first entry, "auto", is the detect-language pseudo code and is valid
/// anywhere a source language is expected.
const LANGUAGES: &[(&str, &str)] = &[
    ("auto", "Detect language"),
    ("ab", "Abkhaz"),
    ("ace", "Acehnese"),
    ("ach", "Acholi"),
    ("aa", "Afar"),
    ("af", "Afrikaans"),
    ("sq", "Albanian"),
    ("alz", "Alur"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("hy", "Armenian"),
    ("as", "Assamese"),
    ("av", "Avar"),
    ("awa", "Awadhi"),
    ("ay", "Aymara"),
    ("az", "Azerbaijani"),
    ("ban", "Balinese"),
    ("bal", "Baluchi"),
    ("bm", "Bambara"),
    ("bci", "Baoulé"),
    ("ba", "Bashkir"),
    ("eu", "Basque"),
    ("btx", "Batak Karo"),
    ("bts", "Batak Simalungun"),
    ("bbc", "Batak Toba"),
    ("be", "Belarusian"),
    ("bem", "Bemba"),
    ("bn", "Bengali"),
    ("bew", "Betawi"),
    ("bho", "Bhojpuri"),
    ("bik", "Bikol"),
    ("bs", "Bosnian"),
    ("br", "Breton"),
    ("bg", "Bulgarian"),
    ("bua", "Buryat"),
    ("yue", "Cantonese"),
    ("ca", "Catalan"),
    ("ceb", "Cebuano"),
    ("ch", "Chamorro"),
    ("ce", "Chechen"),
    ("ny", "Chichewa"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
    ("chk", "Chuukese"),
    ("cv", "Chuvash"),
    ("co", "Corsican"),
    ("crh", "Crimean Tatar"),
    ("hr", "Croatian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("fa-AF", "Dari"),
    ("dv", "Dhivehi"),
    ("din", "Dinka"),
    ("doi", "Dogri"),
    ("dov", "Dombe"),
    ("nl", "Dutch"),
    ("dyu", "Dyula"),
    ("dz", "Dzongkha"),
    ("en", "English"),
    ("eo", "Esperanto"),
    ("et", "Estonian"),
    ("ee", "Ewe"),
    ("fo", "Faroese"),
    ("fj", "Fijian"),
    ("tl", "Filipino"),
    ("fi", "Finnish"),
    ("fon", "Fon"),
    ("fr", "French"),
    ("fy", "Frisian"),
    ("fur", "Friulian"),
    ("ff", "Fulani"),
    ("gaa", "Ga"),
    ("gl", "Galician"),
    ("ka", "Georgian"),
    ("de", "German"),
    ("el", "Greek"),
    ("gn", "Guarani"),
    ("gu", "Gujarati"),
    ("ht", "Haitian Creole"),
    ("cnh", "Hakha Chin"),
    ("ha", "Hausa"),
    ("haw", "Hawaiian"),
    ("he", "Hebrew"),
    ("iw", "Hebrew"),
    ("hil", "Hiligaynon"),
    ("hi", "Hindi"),
    ("hmn", "Hmong"),
    ("hu", "Hungarian"),
    ("hrx", "Hunsrik"),
    ("iba", "Iban"),
    ("is", "Icelandic"),
    ("ig", "Igbo"),
    ("ilo", "Ilocano"),
    ("id", "Indonesian"),
    ("ga", "Irish"),
    ("it", "Italian"),
    ("jam", "Jamaican Patois"),
    ("ja", "Japanese"),
    ("jw", "Javanese"),
    ("kac", "Jingpo"),
    ("kl", "Kalaallisut"),
    ("kn", "Kannada"),
    ("kr", "Kanuri"),
    ("pam", "Kapampangan"),
    ("kk", "Kazakh"),
    ("kha", "Khasi"),
    ("km", "Khmer"),
    ("cgg", "Kiga"),
    ("kg", "Kikongo"),
    ("rw", "Kinyarwanda"),
    ("ktu", "Kituba"),
    ("trp", "Kokborok"),
    ("kv", "Komi"),
    ("gom", "Konkani"),
    ("ko", "Korean"),
    ("kri", "Krio"),
    ("ku", "Kurdish (Kurmanji)"),
    ("ckb", "Kurdish (Sorani)"),
    ("ky", "Kyrgyz"),
    ("lo", "Lao"),
    ("ltg", "Latgalian"),
    ("la", "Latin"),
    ("lv", "Latvian"),
    ("lij", "Ligurian"),
    ("li", "Limburgish"),
    ("ln", "Lingala"),
    ("lt", "Lithuanian"),
    ("lmo", "Lombard"),
    ("lg", "Luganda"),
    ("luo", "Luo"),
    ("lb", "Luxembourgish"),
    ("mk", "Macedonian"),
    ("mad", "Madurese"),
    ("mai", "Maithili"),
    ("mak", "Makassar"),
    ("mg", "Malagasy"),
    ("ms", "Malay"),
    ("ms-Arab", "Malay (Jawi)"),
    ("ml", "Malayalam"),
    ("mt", "Maltese"),
    ("mam", "Mam"),
    ("gv", "Manx"),
    ("mi", "Maori"),
    ("mr", "Marathi"),
    ("mh", "Marshallese"),
    ("mwr", "Marwadi"),
    ("mfe", "Mauritian Creole"),
    ("chm", "Meadow Mari"),
    ("mni-Mtei", "Meiteilon (Manipuri)"),
    ("min", "Minang"),
    ("lus", "Mizo"),
    ("mn", "Mongolian"),
    ("my", "Myanmar (Burmese)"),
    ("nhe", "Nahuatl (Eastern Huasteca)"),
    ("ndc-ZW", "Ndau"),
    ("nr", "Ndebele (South)"),
    ("new", "Nepalbhasa (Newari)"),
    ("ne", "Nepali"),
    ("bm-Nkoo", "NKo"),
    ("no", "Norwegian"),
    ("nus", "Nuer"),
    ("oc", "Occitan"),
    ("or", "Odia (Oriya)"),
    ("om", "Oromo"),
    ("os", "Ossetian"),
    ("pag", "Pangasinan"),
    ("pap", "Papiamento"),
    ("ps", "Pashto"),
    ("fa", "Persian"),
    ("pl", "Polish"),
    ("pt", "Portuguese (Brazil)"),
    ("pt-PT", "Portuguese (Portugal)"),
    ("pa", "Punjabi (Gurmukhi)"),
    ("pa-Arab", "Punjabi (Shahmukhi)"),
    ("qu", "Quechua"),
    ("kek", "Qʼeqchiʼ"),
    ("rom", "Romani"),
    ("ro", "Romanian"),
    ("rn", "Rundi"),
    ("ru", "Russian"),
    ("se", "Sami (North)"),
    ("sm", "Samoan"),
    ("sg", "Sango"),
    ("sa", "Sanskrit"),
    ("sat-Latn", "Santali"),
    ("gd", "Scots Gaelic"),
    ("nso", "Sepedi"),
    ("sr", "Serbian"),
    ("st", "Sesotho"),
    ("crs", "Seychellois Creole"),
    ("shn", "Shan"),
    ("sn", "Shona"),
    ("scn", "Sicilian"),
    ("szl", "Silesian"),
    ("sd", "Sindhi"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("so", "Somali"),
    ("es", "Spanish"),
    ("su", "Sundanese"),
    ("sus", "Susu"),
    ("sw", "Swahili"),
    ("ss", "Swati"),
    ("sv", "Swedish"),
    ("ty", "Tahitian"),
    ("tg", "Tajik"),
    ("ber-Latn", "Tamazight"),
    ("ber", "Tamazight (Tifinagh)"),
    ("ta", "Tamil"),
    ("tt", "Tatar"),
    ("te", "Telugu"),
    ("tet", "Tetum"),
    ("th", "Thai"),
    ("bo", "Tibetan"),
    ("ti", "Tigrinya"),
    ("tiv", "Tiv"),
    ("tpi", "Tok Pisin"),
    ("to", "Tongan"),
    ("ts", "Tsonga"),
    ("tn", "Tswana"),
    ("tcy", "Tulu"),
    ("tum", "Tumbuka"),
    ("tr", "Turkish"),
    ("tk", "Turkmen"),
    ("tyv", "Tuvan"),
    ("ak", "Twi"),
    ("udm", "Udmurt"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("ug", "Uyghur"),
    ("uz", "Uzbek"),
    ("ve", "Venda"),
    ("vec", "Venetian"),
    ("vi", "Vietnamese"),
    ("war", "Waray"),
    ("cy", "Welsh"),
    ("wo", "Wolof"),
    ("xh", "Xhosa"),
    ("sah", "Yakut"),
    ("yi", "Yiddish"),
    ("yo", "Yoruba"),
    ("yua", "Yucatec Maya"),
    ("zap", "Zapotec"),
    ("zu", "Zulu"),];
