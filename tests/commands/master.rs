use quantctl::commands::master::{MasterCli, RollRulesRequest, RollrulesArgs};
use quantctl::core::dispatch::{DispatchTarget, Invocation};
use quantctl::core::error::QuantError;
use quantctl::parse_invocation;
use serde_json::{Value, json};
use std::path::PathBuf;

fn parse(args: &[&str]) -> Result<Invocation, QuantError> {
    parse_invocation(["quantctl", "master"].iter().chain(args.iter()).copied())
}

fn ok(args: &[&str]) -> Invocation {
    parse(args).unwrap_or_else(|e| panic!("master {:?} should parse: {}", args, e))
}

fn assert_rejected(args: &[&str]) {
    match parse(args) {
        Err(QuantError::Usage(_)) => {}
        other => panic!("expected usage error for {:?}, got {:?}", args, other),
    }
}

fn filter_defaults() -> Value {
    json!({
        "exchanges": null,
        "sec_types": null,
        "currencies": null,
        "groups": null,
        "symbols": null,
        "conids": null,
        "exclude_groups": null,
        "exclude_conids": null,
        "sectors": null,
        "industries": null,
        "categories": null,
        "delisted": false
    })
}

#[test]
fn every_leaf_parses_with_required_args_only() {
    let cases: [(&[&str], DispatchTarget); 11] = [
        (&["exchanges"], DispatchTarget::MasterListExchanges),
        (&["listings"], DispatchTarget::MasterPullListings),
        (&["get", "out.csv"], DispatchTarget::MasterDownloadSecuritiesFile),
        (&["conids"], DispatchTarget::MasterGetConids),
        (&["diff"], DispatchTarget::MasterDiffSecurities),
        (&["group", "my-group"], DispatchTarget::MasterCreateGroup),
        (&["rmgroup", "my-group"], DispatchTarget::MasterDeleteGroup),
        (&["frontmonth", "ES", "GLOBEX"], DispatchTarget::MasterGetFrontmonth),
        (&["rollrules"], DispatchTarget::MasterLoadOrShowRollrules),
        (&["delist"], DispatchTarget::MasterDelist),
        (&["lots", "lots.csv"], DispatchTarget::MasterLoadLots),
    ];
    for (args, target) in cases {
        assert_eq!(ok(args).target, target, "master {:?}", args);
    }
}

#[test]
fn exchanges_defaults_are_unset() {
    let inv = ok(&["exchanges"]);
    assert_eq!(inv.params, json!({"regions": null, "sec_types": null}));
}

#[test]
fn exchanges_short_flags() {
    let inv = ok(&["exchanges", "-r", "europe", "global", "-s", "FUT"]);
    assert_eq!(inv.params["regions"], json!(["europe", "global"]));
    assert_eq!(inv.params["sec_types"], json!(["FUT"]));
}

#[test]
fn every_choice_argument_rejects_out_of_set_values() {
    assert_rejected(&["exchanges", "--regions", "africa"]);
    assert_rejected(&["exchanges", "--regions", "North_America"]);
    assert_rejected(&["exchanges", "--sec-types", "BOND"]);
    assert_rejected(&["exchanges", "--sec-types", "stk"]);
    assert_rejected(&["listings", "--sec-types", "OPT"]);
    assert_rejected(&["get", "out.csv", "--sec-types", "WAR"]);
    assert_rejected(&["conids", "-t", "CFD"]);
    assert_rejected(&["group", "g", "--sec-type", "ETF"]);
    assert_rejected(&["group", "g", "--sec-type", "IND"]);
}

#[test]
fn listings_defaults_and_values() {
    let inv = ok(&["listings"]);
    assert_eq!(
        inv.params,
        json!({
            "exchange": null,
            "sec_types": null,
            "currencies": null,
            "symbols": null,
            "groups": null,
            "conids": null
        })
    );

    let inv = ok(&["listings", "--exchange", "ISLAND", "--symbols", "AAPL", "GOOG", "NFLX"]);
    assert_eq!(inv.params["exchange"], "ISLAND");
    assert_eq!(inv.params["symbols"], json!(["AAPL", "GOOG", "NFLX"]));

    let inv = ok(&["listings", "-g", "japan-fin", "-i", "1", "2"]);
    assert_eq!(inv.params["groups"], json!(["japan-fin"]));
    assert_eq!(inv.params["conids"], json!([1, 2]));
    assert!(inv.params["exchange"].is_null());
}

#[test]
fn get_defaults_to_csv_with_all_filters_unset() {
    let inv = ok(&["get", "mexi.csv"]);
    let mut expected = filter_defaults();
    expected["filepath"] = json!("mexi.csv");
    expected["output"] = json!("csv");
    assert_eq!(inv.params, expected);
}

#[test]
fn get_json_and_filters() {
    let inv = ok(&[
        "get",
        "secs.json",
        "--json",
        "--groups",
        "mexi-fut",
        "--exclude-conids",
        "99",
        "--sectors",
        "Consumer, Cyclical",
        "-d",
    ]);
    assert_eq!(inv.params["output"], "json");
    assert_eq!(inv.params["groups"], json!(["mexi-fut"]));
    assert_eq!(inv.params["exclude_conids"], json!([99]));
    assert_eq!(inv.params["sectors"], json!(["Consumer, Cyclical"]));
    assert_eq!(inv.params["delisted"], true);
}

#[test]
fn get_requires_filename() {
    assert_rejected(&["get"]);
    assert_rejected(&["get", "--json"]);
}

#[test]
fn conids_uses_the_shared_filter_set() {
    assert_eq!(ok(&["conids"]).params, filter_defaults());
    let inv = ok(&["conids", "--exchanges", "ASX", "--sectors", "Energy"]);
    assert_eq!(inv.params["exchanges"], json!(["ASX"]));
    assert_eq!(inv.params["sectors"], json!(["Energy"]));
}

#[test]
fn conid_lists_must_be_integers() {
    assert_rejected(&["conids", "--conids", "12a"]);
    assert_rejected(&["listings", "--conids", "x"]);
    assert_rejected(&["diff", "-i", "1.5"]);
}

#[test]
fn diff_flags() {
    let inv = ok(&["diff"]);
    assert_eq!(
        inv.params,
        json!({
            "groups": null,
            "conids": null,
            "fields": null,
            "delist_missing": false,
            "delist_exchanges": null
        })
    );

    let inv = ok(&[
        "diff",
        "--groups",
        "nasdaq-sml",
        "--fields",
        "Sector",
        "Industry",
        "--delist-missing",
        "--delist-exchanges",
        "PINK",
    ]);
    assert_eq!(inv.params["fields"], json!(["Sector", "Industry"]));
    assert_eq!(inv.params["delist_missing"], true);
    assert_eq!(inv.params["delist_exchanges"], json!(["PINK"]));
}

#[test]
fn group_defaults() {
    let inv = ok(&["group", "liquid-stk"]);
    assert_eq!(inv.params["name"], "liquid-stk");
    for key in [
        "exchange",
        "sec_type",
        "currency",
        "min_liq",
        "max_liq",
        "from_groups",
        "symbols",
        "conids",
        "sectors",
        "industries",
        "categories",
        "input_file",
    ] {
        assert!(inv.params[key].is_null(), "{} should be unset", key);
    }
    assert_eq!(inv.params["exclude_delisted"], false);
    assert_eq!(inv.params["append"], false);
}

#[test]
fn group_thresholds_are_integers() {
    let inv = ok(&["group", "g", "-n", "500000", "-x", "9000000", "-t", "STK", "-e", "TSE"]);
    assert_eq!(inv.params["min_liq"], 500000);
    assert_eq!(inv.params["max_liq"], 9000000);
    assert_eq!(inv.params["sec_type"], "STK");
    assert_eq!(inv.params["exchange"], "TSE");

    let inv = ok(&["group", "g", "--min-liq", "-5"]);
    assert_eq!(inv.params["min_liq"], -5);

    assert_rejected(&["group", "g", "--min-liq", "1e6"]);
    assert_rejected(&["group", "g", "--max-liq", "many"]);
}

#[test]
fn group_requires_name() {
    assert_rejected(&["group"]);
    assert_rejected(&["group", "--append"]);
}

#[test]
fn rmgroup_requires_group() {
    assert_eq!(ok(&["rmgroup", "old"]).params, json!({"group": "old"}));
    assert_rejected(&["rmgroup"]);
}

#[test]
fn frontmonth_es_globex() {
    let inv = ok(&["frontmonth", "ES", "GLOBEX"]);
    assert_eq!(inv.target, DispatchTarget::MasterGetFrontmonth);
    assert_eq!(
        inv.params,
        json!({
            "symbol": "ES",
            "exchange": "GLOBEX",
            "currency": null,
            "multiplier": null,
            "start_date": null,
            "end_date": null
        })
    );
}

#[test]
fn frontmonth_requires_symbol_and_exchange() {
    assert_rejected(&["frontmonth"]);
    assert_rejected(&["frontmonth", "ES"]);
    assert_rejected(&["frontmonth", "ES", "GLOBEX", "--start-date", "2017-13-01"]);
}

#[test]
fn frontmonth_date_range() {
    let inv = ok(&[
        "frontmonth",
        "NQ",
        "GLOBEX",
        "--currency",
        "USD",
        "--multiplier",
        "20",
        "--start-date",
        "2017-01-01",
        "--end-date",
        "2017-03-31",
    ]);
    assert_eq!(inv.params["currency"], "USD");
    assert_eq!(inv.params["multiplier"], "20");
    assert_eq!(inv.params["start_date"], "2017-01-01");
    assert_eq!(inv.params["end_date"], "2017-03-31");
}

#[test]
fn rollrules_show_or_load() {
    assert_eq!(ok(&["rollrules"]).params, json!({"action": "show"}));
    assert_eq!(
        ok(&["rollrules", "myrolloverrules.yml"]).params,
        json!({"action": "load", "filename": "myrolloverrules.yml"})
    );
    assert_rejected(&["rollrules", "a.yml", "b.yml"]);

    let request = RollRulesRequest::from(RollrulesArgs { filename: None });
    assert_eq!(request, RollRulesRequest::Show);
    let request = RollRulesRequest::from(RollrulesArgs {
        filename: Some(PathBuf::from("r.yml")),
    });
    assert_eq!(
        request,
        RollRulesRequest::Load {
            filename: PathBuf::from("r.yml")
        }
    );
}

#[test]
fn delist_combinations_are_left_to_the_platform() {
    assert_eq!(
        ok(&["delist"]).params,
        json!({"conid": null, "symbol": null, "exchange": null})
    );
    let inv = ok(&["delist", "-s", "XYZ", "-e", "NYSE"]);
    assert_eq!(inv.params["symbol"], "XYZ");
    assert_eq!(inv.params["exchange"], "NYSE");
    assert_eq!(ok(&["delist", "-c", "123"]).params["conid"], 123);
    assert_rejected(&["delist", "-c", "ABC"]);
}

#[test]
fn lots_requires_file() {
    assert_eq!(
        ok(&["lots", "lots.csv"]).params,
        json!({"filename": "lots.csv", "groups": null})
    );
    assert_eq!(ok(&["lots", "lots.csv", "-g", "hk-stk"]).params["groups"], "hk-stk");
    assert_rejected(&["lots"]);
}

#[test]
fn master_cli_is_usable_standalone() {
    use clap::Parser;
    let cli = MasterCli::try_parse_from(["master", "rmgroup", "x"]).expect("parse");
    assert_eq!(cli.command.target(), DispatchTarget::MasterDeleteGroup);
}
