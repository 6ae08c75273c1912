use crate::{
    query_escape, AdgangsadresseQuery, AdresseQuery, Kommune, ListKind, ListQuery, ParamError,
    PostnummerQuery, Query, Region, ReverseQuery, TextParam, VejstykkeQuery, DEFAULT_HOST,
};

// --- Parameter rendering ---

#[test]
fn test_single_param_escaping() {
    let p = TextParam::single("singleParam", "Test&*æøåÆØÅ!\"{.}$?=");
    assert_eq!(
        p.render(),
        "singleParam=Test%26%2A%C3%A6%C3%B8%C3%A5%C3%86%C3%98%C3%85%21%22%7B.%7D%24%3F%3D"
    );
}

#[test]
fn test_multi_param_escaping() {
    let p = TextParam::multi("multiParam", ["Mtest!\"#222.%&=?", "Seconday Param*"]);
    assert_eq!(
        p.render(),
        "multiParam=Mtest%21%22%23222.%25%26%3D%3F|Seconday+Param%2A"
    );
}

#[test]
fn test_single_param_renders_first_value_only() {
    let mut p = TextParam::single("srid", "25832");
    p.values.push("4326".into());
    assert_eq!(p.render(), "srid=25832");
}

#[test]
fn test_escape_keeps_unreserved() {
    assert_eq!(query_escape("a-b_c.d~e"), "a-b_c.d~e");
    assert_eq!(query_escape("a b"), "a+b");
}

#[test]
fn test_flag_renders_without_value() {
    assert_eq!(TextParam::flag("noformat").render(), "noformat=");
    let empty = TextParam::multi("etage", Vec::<String>::new()).allow_empty(true);
    assert_eq!(empty.render(), "etage=");
}

#[test]
fn test_merge() {
    let mut a = TextParam::multi("postnr", ["1000"]);
    a.merge(TextParam::multi("postnr", ["2000", "3000"])).unwrap();
    assert_eq!(a.values, vec!["1000", "2000", "3000"]);

    let err = a.merge(TextParam::multi("kode", ["1"])).unwrap_err();
    assert_eq!(
        err,
        ParamError::MergeKeyMismatch {
            left: "postnr".into(),
            right: "kode".into()
        }
    );

    let mut single = TextParam::single("srid", "4326");
    let err = single.merge(TextParam::single("srid", "25832")).unwrap_err();
    assert_eq!(err, ParamError::NotMulti { key: "srid".into() });
}

// --- Query ---

#[test]
fn test_empty_query_has_no_question_mark() {
    let q = Query::new("/adresser");
    assert_eq!(q.url(), format!("{DEFAULT_HOST}/adresser"));
    assert!(!q.has_warnings());
}

#[test]
fn test_keys_keep_insertion_order() {
    let mut q = Query::new("/adresser");
    q.add(TextParam::multi("vejnavn", ["Rødkildevej"]));
    q.add(TextParam::single("srid", "25832"));
    q.add(TextParam::multi("vejnavn", ["Vibevej"]));
    assert_eq!(
        q.url(),
        "http://dawa.aws.dk/adresser?vejnavn=R%C3%B8dkildevej|Vibevej&srid=25832"
    );
}

#[test]
fn test_add_raw_and_host() {
    let mut q = Query::new("/adresser");
    q.with_host("http://localhost:8080");
    q.on_path("/adgangsadresser");
    q.add_raw("struktur", "mini");
    assert_eq!(q.host(), "http://localhost:8080");
    assert_eq!(q.url(), "http://localhost:8080/adgangsadresser?struktur=mini");
}

#[test]
fn test_multi_value_setter() {
    let url = AdresseQuery::new().postnr(["", "1234", "abcdef"]).url();
    assert_eq!(url, "http://dawa.aws.dk/adresser?postnr=|1234|abcdef");
}

#[test]
fn test_second_single_value_is_ignored_with_warning() {
    let q = AdresseQuery::new().srid("25832").srid("4326");
    assert_eq!(q.url(), "http://dawa.aws.dk/adresser?srid=25832");
    assert_eq!(
        q.warnings(),
        &[ParamError::DuplicateValue { key: "srid".into() }]
    );
}

#[test]
fn test_repeated_multi_setter_merges() {
    let q = AdgangsadresseQuery::new()
        .kommunekode(["0101"])
        .kommunekode(["0751", "0461"]);
    assert_eq!(
        q.url(),
        "http://dawa.aws.dk/adgangsadresser?kommunekode=0101|0751|0461"
    );
    assert!(q.warnings().is_empty());
}

#[test]
fn test_adresse_query_url() {
    let url = AdresseQuery::new()
        .vejnavn(["Rødkildevej"])
        .husnr(["46"])
        .etage(["st"])
        .doer(["th"])
        .status(1)
        .noformat()
        .url();
    assert_eq!(
        url,
        "http://dawa.aws.dk/adresser?vejnavn=R%C3%B8dkildevej&husnr=46&etage=st&d%C3%B8r=th&status=1&noformat="
    );
}

#[test]
fn test_noformat_is_added_once() {
    let url = AdresseQuery::new().noformat().noformat().q("x").url();
    assert_eq!(url, "http://dawa.aws.dk/adresser?noformat=&q=x");
}

#[test]
fn test_autocomplete_paths() {
    assert_eq!(
        AdresseQuery::autocomplete().q("Rødkilde").url(),
        "http://dawa.aws.dk/adresser/autocomplete?q=R%C3%B8dkilde"
    );
    assert_eq!(
        AdgangsadresseQuery::autocomplete().url(),
        "http://dawa.aws.dk/adgangsadresser/autocomplete"
    );
    assert_eq!(
        PostnummerQuery::autocomplete().url(),
        "http://dawa.aws.dk/postnumre/autocomplete"
    );
}

#[test]
fn test_spatial_parameters() {
    let url = AdgangsadresseQuery::new()
        .cirkel("12.58,55.68,100")
        .srid("4326")
        .per_side(10)
        .side(2)
        .url();
    assert_eq!(
        url,
        "http://dawa.aws.dk/adgangsadresser?cirkel=12.58%2C55.68%2C100&srid=4326&per_side=10&side=2"
    );
}

#[test]
fn test_postnummer_query_url() {
    let url = PostnummerQuery::new()
        .nr(["8000", "8200"])
        .kommunekode(["0751"])
        .stormodtagere(false)
        .url();
    assert_eq!(
        url,
        "http://dawa.aws.dk/postnumre?nr=8000|8200&kommunekode=0751&stormodtagere=false"
    );
}

#[test]
fn test_vejstykke_query_url() {
    let url = VejstykkeQuery::new()
        .kommunekode(["0101"])
        .navn(["Abel Cathrines Gade"])
        .url();
    assert_eq!(
        url,
        "http://dawa.aws.dk/vejstykker?kommunekode=0101&navn=Abel+Cathrines+Gade"
    );
}

// --- Lists ---

#[test]
fn test_list_kind_paths() {
    let expected = [
        (ListKind::Regioner, "/regioner"),
        (ListKind::Kommuner, "/kommuner"),
        (ListKind::Sogne, "/sogne"),
        (ListKind::Retskredse, "/retskredse"),
        (ListKind::Politikredse, "/politikredse"),
        (ListKind::Opstillingskredse, "/opstillingskredse"),
        (ListKind::Valglandsdele, "/valglandsdele"),
        (ListKind::Ejerlav, "/ejerlav"),
    ];
    for (kind, path) in expected {
        assert_eq!(kind.path(), path);
        assert_eq!(kind.as_str().parse::<ListKind>().unwrap(), kind);
    }
    assert!("veje".parse::<ListKind>().is_err());
}

#[test]
fn test_list_query_url() {
    let q = ListQuery::<Region>::new(false).kode(["1084", "1085"]);
    assert_eq!(q.kind(), ListKind::Regioner);
    assert_eq!(q.url(), "http://dawa.aws.dk/regioner?kode=1084|1085");

    let q = ListQuery::<Kommune>::new(true).q(["Køb*"]);
    assert_eq!(q.url(), "http://dawa.aws.dk/kommuner/autocomplete?q=K%C3%B8b%2A");
}

#[test]
fn test_reverse_query_url() {
    let q = ReverseQuery::<Kommune>::new(12.5851471984198, 55.6832383751223, None);
    assert_eq!(
        q.url(),
        "http://dawa.aws.dk/kommuner/reverse?x=12.5851471984198&y=55.6832383751223"
    );

    let q = ReverseQuery::<Region>::new(725025.0, 6166305.5, Some("25832"));
    assert_eq!(
        q.url(),
        "http://dawa.aws.dk/regioner/reverse?x=725025&y=6166305.5&srid=25832"
    );
}
