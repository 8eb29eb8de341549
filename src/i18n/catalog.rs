//! ISO 639-1 语言名称表
//!
//! 既是 Locale Naming 的命名数据，也是目标语言选择所用的 Locale Catalog。
//! 按 code 升序排列（`lookup` 依赖二分查找）。

/// 单个语言的名称条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageName {
    pub code: &'static str,
    pub english: &'static str,
    pub japanese: &'static str,
}

const fn entry(code: &'static str, english: &'static str, japanese: &'static str) -> LanguageName {
    LanguageName {
        code,
        english,
        japanese,
    }
}

/// "und"（无法判定的语言）的名称。命名系统能给出名字，但永远不算 displayable。
pub const UNDETERMINED_NAME: LanguageName = entry("und", "Unknown language", "言語不明");

pub const LANGUAGES: &[LanguageName] = &[
    entry("aa", "Afar", "アファル語"),
    entry("ab", "Abkhazian", "アブハズ語"),
    entry("ae", "Avestan", "アヴェスタ語"),
    entry("af", "Afrikaans", "アフリカーンス語"),
    entry("ak", "Akan", "アカン語"),
    entry("am", "Amharic", "アムハラ語"),
    entry("an", "Aragonese", "アラゴン語"),
    entry("ar", "Arabic", "アラビア語"),
    entry("as", "Assamese", "アッサム語"),
    entry("av", "Avaric", "アヴァル語"),
    entry("ay", "Aymara", "アイマラ語"),
    entry("az", "Azerbaijani", "アゼルバイジャン語"),
    entry("ba", "Bashkir", "バシキール語"),
    entry("be", "Belarusian", "ベラルーシ語"),
    entry("bg", "Bulgarian", "ブルガリア語"),
    entry("bh", "Bihari", "ビハール語"),
    entry("bi", "Bislama", "ビスラマ語"),
    entry("bm", "Bambara", "バンバラ語"),
    entry("bn", "Bangla", "ベンガル語"),
    entry("bo", "Tibetan", "チベット語"),
    entry("br", "Breton", "ブルトン語"),
    entry("bs", "Bosnian", "ボスニア語"),
    entry("ca", "Catalan", "カタロニア語"),
    entry("ce", "Chechen", "チェチェン語"),
    entry("ch", "Chamorro", "チャモロ語"),
    entry("co", "Corsican", "コルシカ語"),
    entry("cr", "Cree", "クリー語"),
    entry("cs", "Czech", "チェコ語"),
    entry("cu", "Church Slavic", "教会スラブ語"),
    entry("cv", "Chuvash", "チュヴァシ語"),
    entry("cy", "Welsh", "ウェールズ語"),
    entry("da", "Danish", "デンマーク語"),
    entry("de", "German", "ドイツ語"),
    entry("dv", "Divehi", "ディベヒ語"),
    entry("dz", "Dzongkha", "ゾンカ語"),
    entry("ee", "Ewe", "エウェ語"),
    entry("el", "Greek", "ギリシャ語"),
    entry("en", "English", "英語"),
    entry("eo", "Esperanto", "エスペラント語"),
    entry("es", "Spanish", "スペイン語"),
    entry("et", "Estonian", "エストニア語"),
    entry("eu", "Basque", "バスク語"),
    entry("fa", "Persian", "ペルシア語"),
    entry("ff", "Fula", "フラ語"),
    entry("fi", "Finnish", "フィンランド語"),
    entry("fj", "Fijian", "フィジー語"),
    entry("fo", "Faroese", "フェロー語"),
    entry("fr", "French", "フランス語"),
    entry("fy", "Western Frisian", "西フリジア語"),
    entry("ga", "Irish", "アイルランド語"),
    entry("gd", "Scottish Gaelic", "スコットランド・ゲール語"),
    entry("gl", "Galician", "ガリシア語"),
    entry("gn", "Guarani", "グアラニー語"),
    entry("gu", "Gujarati", "グジャラート語"),
    entry("gv", "Manx", "マン島語"),
    entry("ha", "Hausa", "ハウサ語"),
    entry("he", "Hebrew", "ヘブライ語"),
    entry("hi", "Hindi", "ヒンディー語"),
    entry("ho", "Hiri Motu", "ヒリモツ語"),
    entry("hr", "Croatian", "クロアチア語"),
    entry("ht", "Haitian Creole", "ハイチ・クレオール語"),
    entry("hu", "Hungarian", "ハンガリー語"),
    entry("hy", "Armenian", "アルメニア語"),
    entry("hz", "Herero", "ヘレロ語"),
    entry("ia", "Interlingua", "インターリングア"),
    entry("id", "Indonesian", "インドネシア語"),
    entry("ie", "Interlingue", "インターリング"),
    entry("ig", "Igbo", "イボ語"),
    entry("ii", "Sichuan Yi", "四川イ語"),
    entry("ik", "Inupiaq", "イヌピアック語"),
    entry("io", "Ido", "イド語"),
    entry("is", "Icelandic", "アイスランド語"),
    entry("it", "Italian", "イタリア語"),
    entry("iu", "Inuktitut", "イヌクティトット語"),
    entry("ja", "Japanese", "日本語"),
    entry("jv", "Javanese", "ジャワ語"),
    entry("ka", "Georgian", "ジョージア語"),
    entry("kg", "Kongo", "コンゴ語"),
    entry("ki", "Kikuyu", "キクユ語"),
    entry("kj", "Kuanyama", "クワニャマ語"),
    entry("kk", "Kazakh", "カザフ語"),
    entry("kl", "Kalaallisut", "グリーンランド語"),
    entry("km", "Khmer", "クメール語"),
    entry("kn", "Kannada", "カンナダ語"),
    entry("ko", "Korean", "韓国語"),
    entry("kr", "Kanuri", "カヌリ語"),
    entry("ks", "Kashmiri", "カシミール語"),
    entry("ku", "Kurdish", "クルド語"),
    entry("kv", "Komi", "コミ語"),
    entry("kw", "Cornish", "コーンウォール語"),
    entry("ky", "Kyrgyz", "キルギス語"),
    entry("la", "Latin", "ラテン語"),
    entry("lb", "Luxembourgish", "ルクセンブルク語"),
    entry("lg", "Ganda", "ガンダ語"),
    entry("li", "Limburgish", "リンブルフ語"),
    entry("ln", "Lingala", "リンガラ語"),
    entry("lo", "Lao", "ラオ語"),
    entry("lt", "Lithuanian", "リトアニア語"),
    entry("lu", "Luba-Katanga", "ルバ・カタンガ語"),
    entry("lv", "Latvian", "ラトビア語"),
    entry("mg", "Malagasy", "マダガスカル語"),
    entry("mh", "Marshallese", "マーシャル語"),
    entry("mi", "Māori", "マオリ語"),
    entry("mk", "Macedonian", "マケドニア語"),
    entry("ml", "Malayalam", "マラヤーラム語"),
    entry("mn", "Mongolian", "モンゴル語"),
    entry("mr", "Marathi", "マラーティー語"),
    entry("ms", "Malay", "マレー語"),
    entry("mt", "Maltese", "マルタ語"),
    entry("my", "Burmese", "ミャンマー語"),
    entry("na", "Nauru", "ナウル語"),
    entry("nb", "Norwegian Bokmål", "ノルウェー語(ブークモール)"),
    entry("nd", "North Ndebele", "北ンデベレ語"),
    entry("ne", "Nepali", "ネパール語"),
    entry("ng", "Ndonga", "ンドンガ語"),
    entry("nl", "Dutch", "オランダ語"),
    entry("nn", "Norwegian Nynorsk", "ノルウェー語(ニーノシュク)"),
    entry("no", "Norwegian", "ノルウェー語"),
    entry("nr", "South Ndebele", "南ンデベレ語"),
    entry("nv", "Navajo", "ナバホ語"),
    entry("ny", "Nyanja", "ニャンジャ語"),
    entry("oc", "Occitan", "オック語"),
    entry("oj", "Ojibwa", "オジブウェー語"),
    entry("om", "Oromo", "オロモ語"),
    entry("or", "Odia", "オディア語"),
    entry("os", "Ossetic", "オセット語"),
    entry("pa", "Punjabi", "パンジャブ語"),
    entry("pi", "Pali", "パーリ語"),
    entry("pl", "Polish", "ポーランド語"),
    entry("ps", "Pashto", "パシュトゥー語"),
    entry("pt", "Portuguese", "ポルトガル語"),
    entry("qu", "Quechua", "ケチュア語"),
    entry("rm", "Romansh", "ロマンシュ語"),
    entry("rn", "Rundi", "ルンディ語"),
    entry("ro", "Romanian", "ルーマニア語"),
    entry("ru", "Russian", "ロシア語"),
    entry("rw", "Kinyarwanda", "キニアルワンダ語"),
    entry("sa", "Sanskrit", "サンスクリット語"),
    entry("sc", "Sardinian", "サルデーニャ語"),
    entry("sd", "Sindhi", "シンド語"),
    entry("se", "Northern Sami", "北サーミ語"),
    entry("sg", "Sango", "サンゴ語"),
    entry("si", "Sinhala", "シンハラ語"),
    entry("sk", "Slovak", "スロバキア語"),
    entry("sl", "Slovenian", "スロベニア語"),
    entry("sm", "Samoan", "サモア語"),
    entry("sn", "Shona", "ショナ語"),
    entry("so", "Somali", "ソマリ語"),
    entry("sq", "Albanian", "アルバニア語"),
    entry("sr", "Serbian", "セルビア語"),
    entry("ss", "Swati", "スワジ語"),
    entry("st", "Southern Sotho", "南部ソト語"),
    entry("su", "Sundanese", "スンダ語"),
    entry("sv", "Swedish", "スウェーデン語"),
    entry("sw", "Swahili", "スワヒリ語"),
    entry("ta", "Tamil", "タミル語"),
    entry("te", "Telugu", "テルグ語"),
    entry("tg", "Tajik", "タジク語"),
    entry("th", "Thai", "タイ語"),
    entry("ti", "Tigrinya", "ティグリニア語"),
    entry("tk", "Turkmen", "トルクメン語"),
    entry("tl", "Tagalog", "タガログ語"),
    entry("tn", "Tswana", "ツワナ語"),
    entry("to", "Tongan", "トンガ語"),
    entry("tr", "Turkish", "トルコ語"),
    entry("ts", "Tsonga", "ツォンガ語"),
    entry("tt", "Tatar", "タタール語"),
    entry("tw", "Twi", "トウィ語"),
    entry("ty", "Tahitian", "タヒチ語"),
    entry("ug", "Uyghur", "ウイグル語"),
    entry("uk", "Ukrainian", "ウクライナ語"),
    entry("ur", "Urdu", "ウルドゥー語"),
    entry("uz", "Uzbek", "ウズベク語"),
    entry("ve", "Venda", "ベンダ語"),
    entry("vi", "Vietnamese", "ベトナム語"),
    entry("vo", "Volapük", "ヴォラピュク語"),
    entry("wa", "Walloon", "ワロン語"),
    entry("wo", "Wolof", "ウォロフ語"),
    entry("xh", "Xhosa", "コサ語"),
    entry("yi", "Yiddish", "イディッシュ語"),
    entry("yo", "Yoruba", "ヨルバ語"),
    entry("za", "Zhuang", "チワン語"),
    entry("zh", "Chinese", "中国語"),
    entry("zu", "Zulu", "ズールー語"),
];

/// 按小写 code 查找名称条目
pub fn lookup(code: &str) -> Option<&'static LanguageName> {
    if code == UNDETERMINED_NAME.code {
        return Some(&UNDETERMINED_NAME);
    }
    LANGUAGES
        .binary_search_by(|entry| entry.code.cmp(code))
        .ok()
        .map(|idx| &LANGUAGES[idx])
}
