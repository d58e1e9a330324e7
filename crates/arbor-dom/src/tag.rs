use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Declares [`TagId`] together with a table of the tag names it was built
/// from, so the strum spellings can be checked against the literal names.
macro_rules! known_tags {
    ($($variant:ident = $name:literal,)*) => {
        /// Precomputed identifier for a known HTML tag name.
        ///
        /// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
        ///
        /// Tree construction compares tag names constantly ("if the current
        /// node is a td or th element..."). Resolving the name once when the
        /// element is created turns those checks into integer comparisons.
        /// Unknown tag names have no `TagId`.
        ///
        /// Parsing is ASCII case-insensitive; display is the lowercase name.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString, IntoStaticStr,
        )]
        #[strum(serialize_all = "lowercase", ascii_case_insensitive)]
        pub enum TagId {
            $(
                #[doc = concat!("The `<", $name, ">` element.")]
                $variant,
            )*
        }

        impl TagId {
            /// Every known tag with the name it is spelled as in markup.
            pub const ALL: &'static [(Self, &'static str)] = &[$((Self::$variant, $name),)*];
        }
    };
}

known_tags! {
    A = "a",
    Abbr = "abbr",
    Address = "address",
    Applet = "applet",
    Area = "area",
    Article = "article",
    Aside = "aside",
    Audio = "audio",
    B = "b",
    Base = "base",
    Basefont = "basefont",
    Bdi = "bdi",
    Bdo = "bdo",
    Bgsound = "bgsound",
    Big = "big",
    Blockquote = "blockquote",
    Body = "body",
    Br = "br",
    Button = "button",
    Canvas = "canvas",
    Caption = "caption",
    Center = "center",
    Cite = "cite",
    Code = "code",
    Col = "col",
    Colgroup = "colgroup",
    Data = "data",
    Datalist = "datalist",
    Dd = "dd",
    Del = "del",
    Details = "details",
    Dfn = "dfn",
    Dialog = "dialog",
    Dir = "dir",
    Div = "div",
    Dl = "dl",
    Dt = "dt",
    Em = "em",
    Embed = "embed",
    Fieldset = "fieldset",
    Figcaption = "figcaption",
    Figure = "figure",
    Font = "font",
    Footer = "footer",
    Form = "form",
    Frame = "frame",
    Frameset = "frameset",
    H1 = "h1",
    H2 = "h2",
    H3 = "h3",
    H4 = "h4",
    H5 = "h5",
    H6 = "h6",
    Head = "head",
    Header = "header",
    Hgroup = "hgroup",
    Hr = "hr",
    Html = "html",
    I = "i",
    Iframe = "iframe",
    Image = "image",
    Img = "img",
    Input = "input",
    Ins = "ins",
    Kbd = "kbd",
    Keygen = "keygen",
    Label = "label",
    Legend = "legend",
    Li = "li",
    Link = "link",
    Listing = "listing",
    Main = "main",
    Map = "map",
    Mark = "mark",
    Marquee = "marquee",
    Menu = "menu",
    Meta = "meta",
    Meter = "meter",
    Nav = "nav",
    Nobr = "nobr",
    Noembed = "noembed",
    Noframes = "noframes",
    Noscript = "noscript",
    Object = "object",
    Ol = "ol",
    Optgroup = "optgroup",
    Option = "option",
    Output = "output",
    P = "p",
    Param = "param",
    Picture = "picture",
    Plaintext = "plaintext",
    Pre = "pre",
    Progress = "progress",
    Q = "q",
    Rb = "rb",
    Rp = "rp",
    Rt = "rt",
    Rtc = "rtc",
    Ruby = "ruby",
    S = "s",
    Samp = "samp",
    Script = "script",
    Search = "search",
    Section = "section",
    Select = "select",
    Slot = "slot",
    Small = "small",
    Source = "source",
    Span = "span",
    Strike = "strike",
    Strong = "strong",
    Style = "style",
    Sub = "sub",
    Summary = "summary",
    Sup = "sup",
    Table = "table",
    Tbody = "tbody",
    Td = "td",
    Template = "template",
    Textarea = "textarea",
    Tfoot = "tfoot",
    Th = "th",
    Thead = "thead",
    Time = "time",
    Title = "title",
    Tr = "tr",
    Track = "track",
    Tt = "tt",
    U = "u",
    Ul = "ul",
    Var = "var",
    Video = "video",
    Wbr = "wbr",
    Xmp = "xmp",
}

impl TagId {
    /// Look up the identifier for a tag name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// The lowercase tag name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
    ///
    /// "The following HTML elements are those that end up in the list of
    /// active formatting elements: a, b, big, code, em, font, i, nobr, s,
    /// small, strike, strong, tt, and u."
    #[must_use]
    pub const fn is_formatting(self) -> bool {
        matches!(
            self,
            Self::A
                | Self::B
                | Self::Big
                | Self::Code
                | Self::Em
                | Self::Font
                | Self::I
                | Self::Nobr
                | Self::S
                | Self::Small
                | Self::Strike
                | Self::Strong
                | Self::Tt
                | Self::U
        )
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#special)
    ///
    /// The HTML-namespace members of the "special" category. Tree builders use
    /// this to decide where the adoption agency algorithm and end tag
    /// recovery stop walking the stack of open elements.
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(
            self,
            Self::Address
                | Self::Applet
                | Self::Area
                | Self::Article
                | Self::Aside
                | Self::Base
                | Self::Basefont
                | Self::Bgsound
                | Self::Blockquote
                | Self::Body
                | Self::Br
                | Self::Button
                | Self::Caption
                | Self::Center
                | Self::Col
                | Self::Colgroup
                | Self::Dd
                | Self::Details
                | Self::Dir
                | Self::Div
                | Self::Dl
                | Self::Dt
                | Self::Embed
                | Self::Fieldset
                | Self::Figcaption
                | Self::Figure
                | Self::Footer
                | Self::Form
                | Self::Frame
                | Self::Frameset
                | Self::H1
                | Self::H2
                | Self::H3
                | Self::H4
                | Self::H5
                | Self::H6
                | Self::Head
                | Self::Header
                | Self::Hgroup
                | Self::Hr
                | Self::Html
                | Self::Iframe
                | Self::Img
                | Self::Input
                | Self::Keygen
                | Self::Li
                | Self::Link
                | Self::Listing
                | Self::Main
                | Self::Marquee
                | Self::Menu
                | Self::Meta
                | Self::Nav
                | Self::Noembed
                | Self::Noframes
                | Self::Noscript
                | Self::Object
                | Self::Ol
                | Self::P
                | Self::Param
                | Self::Plaintext
                | Self::Pre
                | Self::Script
                | Self::Search
                | Self::Section
                | Self::Select
                | Self::Source
                | Self::Style
                | Self::Summary
                | Self::Table
                | Self::Tbody
                | Self::Td
                | Self::Template
                | Self::Textarea
                | Self::Tfoot
                | Self::Th
                | Self::Thead
                | Self::Title
                | Self::Tr
                | Self::Track
                | Self::Ul
                | Self::Wbr
                | Self::Xmp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::TagId;

    #[test]
    fn test_strum_spelling_matches_table() {
        for &(tag, name) in TagId::ALL {
            assert_eq!(tag.as_ref(), name);
            assert_eq!(tag.to_string(), name);
            assert_eq!(TagId::from_name(name), Some(tag));
        }
    }

    #[test]
    fn test_lookup_ignores_ascii_case() {
        assert_eq!(TagId::from_name("DIV"), Some(TagId::Div));
        assert_eq!(TagId::from_name("BlockQuote"), Some(TagId::Blockquote));
        assert_eq!(TagId::from_name("H3"), Some(TagId::H3));
    }

    #[test]
    fn test_unknown_tag_has_no_id() {
        assert_eq!(TagId::from_name("custom-widget"), None);
        assert_eq!(TagId::from_name(""), None);
    }

    #[test]
    fn test_categories() {
        assert!(TagId::B.is_formatting());
        assert!(!TagId::Div.is_formatting());
        assert!(TagId::Td.is_special());
        assert!(!TagId::Span.is_special());
    }
}
