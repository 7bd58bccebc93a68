//! End-to-end wire fixtures: literal datagrams in, structured
//! messages out, and the codec's safety properties.

use skua_proto::edns::EdnsOption;
use skua_proto::name::{Name, NameParser};
use skua_proto::rdata::RData;
use skua_proto::record::{ParseMode, ResourceRecord};
use skua_proto::{Error, Header, Message, Question, Type};
use skua_ede::EdeCode;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// The sample A-record response: id=42, flags=0x0100, one answer for
/// "query." with ttl 100 and address 123.45.67.9.
fn a_record_response() -> Vec<u8> {
    let mut wire = vec![
        0x00, 0x2A, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    ];
    wire.extend_from_slice(&[0x05, b'q', b'u', b'e', b'r', b'y', 0x00]); // name
    wire.extend_from_slice(&[0x00, 0x01]); // type A
    wire.extend_from_slice(&[0x00, 0x01]); // class IN
    wire.extend_from_slice(&[0x00, 0x00, 0x00, 0x64]); // ttl 100
    wire.extend_from_slice(&[0x00, 0x04]); // rdlength
    wire.extend_from_slice(&[0x7B, 0x2D, 0x43, 0x09]); // 123.45.67.9
    wire
}

#[test]
fn s1_a_record_response() {
    let message = Message::parse(&a_record_response()).unwrap();

    assert_eq!(message.header().id, 42);
    assert_eq!(message.header().flags_word(), 0x0100);
    assert_eq!(message.answers().len(), 1);

    let answer = &message.answers()[0];
    assert_eq!(answer.name().to_string(), "query.");
    assert_eq!(answer.ttl(), 100);
    assert_eq!(answer.rclass().to_u16(), 1);
    assert_eq!(answer.rtype().to_u16(), 1);
    assert_eq!(answer.rdata().wire_len(), 4);
    assert_eq!(answer.rdata().as_a(), Some(Ipv4Addr::new(123, 45, 67, 9)));
}

#[test]
fn s2_compressed_cname_chain() {
    // Question name at offset 0x0C; the answer's owner and CNAME
    // target both point back at it.
    let mut wire = vec![
        0x00, 0x07, 0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    ];
    wire.extend_from_slice(&[
        0x03, b'w', b'w', b'w', 0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o',
        b'm', 0x00,
    ]);
    wire.extend_from_slice(&[0x00, 0x05, 0x00, 0x01]); // QTYPE CNAME, IN
    wire.extend_from_slice(&[0xC0, 0x0C]); // answer owner: pointer to 0x0C
    wire.extend_from_slice(&[0x00, 0x05, 0x00, 0x01]); // CNAME, IN
    wire.extend_from_slice(&[0x00, 0x00, 0x00, 0x78]); // ttl 120
    wire.extend_from_slice(&[0x00, 0x02]); // rdlength 2
    wire.extend_from_slice(&[0xC0, 0x0C]); // target: pointer to 0x0C

    let message = Message::parse(&wire).unwrap();
    let answer = &message.answers()[0];

    assert_eq!(answer.name().to_string(), "www.example.com.");
    assert_eq!(
        message.cname_target().unwrap().to_string(),
        "www.example.com."
    );
}

#[test]
fn s3_truncated_header() {
    let err = Message::parse(&[0x00, 0x2A, 0x01]).unwrap_err();
    assert!(err.is_truncated());
}

#[test]
fn s4_rdlength_overruns_datagram() {
    // The sample response with RDLENGTH rewritten to 8; only 4 bytes
    // of RDATA follow and nothing trails them.
    let mut wire = a_record_response();
    let rdlength_at = wire.len() - 6;
    wire[rdlength_at + 1] = 0x08;

    let err = Message::parse(&wire).unwrap_err();
    assert!(err.is_truncated() || err.is_malformed());
}

#[test]
fn s5_opt_with_nsid_and_ede() {
    let mut wire = vec![
        0x00, 0x2A, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    ];
    wire.extend_from_slice(&[0x00]); // root owner
    wire.extend_from_slice(&[0x00, 0x29]); // OPT
    wire.extend_from_slice(&[0x10, 0x00]); // payload size 4096
    wire.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // ttl overloads
    wire.extend_from_slice(&[0x00, 0x13]); // rdlength 19
    wire.extend_from_slice(&[0x00, 0x03, 0x00, 0x04, 0x61, 0x62, 0x63, 0x64]); // NSID "abcd"
    wire.extend_from_slice(&[
        0x00, 0x0F, 0x00, 0x07, 0x00, 0x06, 0x48, 0x65, 0x6C, 0x6C, 0x6F,
    ]); // EDE 6 "Hello"

    let message = Message::parse(&wire).unwrap();
    let edns = message.edns().expect("OPT should be lifted into Edns");

    assert_eq!(edns.udp_size(), 4096);
    assert_eq!(edns.options().len(), 2);

    match &edns.options()[0] {
        EdnsOption::Nsid { data, utf8 } => {
            assert_eq!(data, b"abcd");
            assert_eq!(utf8.as_deref(), Some("abcd"));
        }
        other => panic!("expected NSID, got {other:?}"),
    }

    match &edns.options()[1] {
        EdnsOption::Ede {
            raw_info_code,
            info_code,
            extra_text,
        } => {
            assert_eq!(*raw_info_code, 6);
            assert_eq!(*info_code, EdeCode::DnssecBogus);
            assert_eq!(extra_text.as_deref(), Some("Hello"));
        }
        other => panic!("expected EDE, got {other:?}"),
    }
}

#[test]
fn s6_unknown_opt_code_skipped() {
    let mut wire = vec![
        0x00, 0x2A, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    ];
    wire.extend_from_slice(&[0x00, 0x00, 0x29, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00]);
    wire.extend_from_slice(&[0x00, 0x0A]); // rdlength 10
    wire.extend_from_slice(&[0x00, 0x63, 0x00, 0x02, 0xDE, 0xAD]); // unknown code 0x63
    wire.extend_from_slice(&[0x00, 0x03, 0x00, 0x00]); // zero-length NSID

    let message = Message::parse(&wire).unwrap();
    let edns = message.edns().unwrap();

    assert_eq!(edns.options().len(), 1);
    assert!(matches!(
        &edns.options()[0],
        EdnsOption::Nsid { data, .. } if data.is_empty()
    ));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn prop_header_roundtrip() {
    for (id, qd, an, ns, ar) in [
        (0u16, 0u16, 0u16, 0u16, 0u16),
        (42, 1, 1, 0, 0),
        (0xFFFF, 1, 20, 4, 9),
    ] {
        let mut header = Header::new(id);
        header.qd_count = qd;
        header.an_count = an;
        header.ns_count = ns;
        header.ar_count = ar;
        header.set_response(true);
        header.set_recursion_desired(true);

        let parsed = Header::parse(&header.to_wire()).unwrap();
        assert_eq!(header, parsed);
    }
}

#[test]
fn prop_name_roundtrip_uncompressed() {
    for text in ["query.", "www.example.com.", "a.b.c.d.e.f.", "."] {
        let name = Name::from_str(text).unwrap();

        let mut buf = bytes::BytesMut::new();
        name.write_wire(&mut buf);

        let (decoded, consumed) = NameParser::new(&buf).parse_name(0).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(decoded, name);
        assert_eq!(decoded.to_string(), text);
        assert!(decoded.to_string().ends_with('.'));
    }
}

#[test]
fn prop_label_bounds_enforced() {
    // A 64-byte label.
    let mut wire = vec![64u8];
    wire.extend_from_slice(&[b'a'; 64]);
    wire.push(0);
    // Length 64 has the 0b01 prefix, so it reads as a reserved label
    // type, which is equally malformed.
    assert!(NameParser::new(&wire).parse_name(0).unwrap_err().is_malformed());

    // A name whose total encoded length exceeds 255.
    let mut wire = Vec::new();
    for _ in 0..4 {
        wire.push(63);
        wire.extend_from_slice(&[b'x'; 63]);
    }
    wire.push(0);
    assert!(matches!(
        NameParser::new(&wire).parse_name(0),
        Err(Error::NameTooLong { .. })
    ));
}

#[test]
fn prop_pointer_cycle_fails_bounded() {
    // An answer owner name pointing at itself.
    let mut wire = vec![
        0x00, 0x01, 0x81, 0x80, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    ];
    wire.extend_from_slice(&[0xC0, 0x0C]); // points to its own offset
    wire.extend_from_slice(&[0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x64, 0x00, 0x04]);
    wire.extend_from_slice(&[1, 2, 3, 4]);

    let err = Message::parse(&wire).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn prop_rdlength_conservation() {
    // MX whose RDATA decoder consumes 5 bytes against a claimed 6.
    let mut wire = vec![
        0x00, 0x01, 0x81, 0x80, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    ];
    wire.extend_from_slice(&[0x01, b'm', 0x00]); // owner "m."
    wire.extend_from_slice(&[0x00, 0x0F, 0x00, 0x01]); // MX, IN
    wire.extend_from_slice(&[0x00, 0x00, 0x00, 0x3C]);
    wire.extend_from_slice(&[0x00, 0x06]); // rdlength 6
    wire.extend_from_slice(&[0x00, 0x0A, 0x01, b'a', 0x00, 0xFF]); // pref, "a.", pad

    let err = Message::parse(&wire).unwrap_err();
    assert!(matches!(err, Error::RDataLengthMismatch { .. }));

    // Lenient mode downgrades the same record and keeps going.
    let message = Message::parse_lenient(&wire).unwrap();
    assert!(matches!(
        message.answers()[0].rdata(),
        RData::Unknown(u) if u.data().len() == 6
    ));
}

#[test]
fn prop_unknown_type_tolerance() {
    // An unknown-type answer followed by a normal A record.
    let mut wire = vec![
        0x00, 0x01, 0x81, 0x80, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00,
    ];
    wire.extend_from_slice(&[0x01, b'u', 0x00]); // "u."
    wire.extend_from_slice(&[0xFF, 0x00, 0x00, 0x01]); // TYPE65280, IN
    wire.extend_from_slice(&[0x00, 0x00, 0x00, 0x3C, 0x00, 0x04]);
    wire.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    wire.extend_from_slice(&[0x01, b'a', 0x00]); // "a."
    wire.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    wire.extend_from_slice(&[0x00, 0x00, 0x00, 0x3C, 0x00, 0x04]);
    wire.extend_from_slice(&[192, 0, 2, 7]);

    let message = Message::parse(&wire).unwrap();
    assert_eq!(message.answers().len(), 2);

    let unknown = &message.answers()[0];
    assert_eq!(unknown.rtype(), Type::Unknown(65280));
    assert!(matches!(
        unknown.rdata(),
        RData::Unknown(u) if u.data().len() == 4
    ));

    assert_eq!(
        message.answers()[1].rdata().as_a(),
        Some(Ipv4Addr::new(192, 0, 2, 7))
    );
}

#[test]
fn prop_opt_skip_between_known_options() {
    let mut wire = vec![
        0x00, 0x2A, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    ];
    wire.extend_from_slice(&[0x00, 0x00, 0x29, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00]);
    wire.extend_from_slice(&[0x00, 0x14]); // rdlength 20
    wire.extend_from_slice(&[0x00, 0x03, 0x00, 0x04, b'n', b'o', b'd', b'e']); // NSID
    wire.extend_from_slice(&[0x00, 0x63, 0x00, 0x02, 0xDE, 0xAD]); // unknown
    wire.extend_from_slice(&[0x00, 0x0F, 0x00, 0x02, 0x00, 0x07]); // EDE 7

    let message = Message::parse(&wire).unwrap();
    let edns = message.edns().unwrap();

    assert_eq!(edns.options().len(), 2);
    assert!(matches!(&edns.options()[0], EdnsOption::Nsid { .. }));
    assert_eq!(edns.ede().unwrap().0, EdeCode::SignatureExpired);
}

#[test]
fn prop_truncation_monotonicity() {
    let wire = a_record_response();

    for k in 0..wire.len() {
        let err = Message::parse(&wire[..k]).expect_err("prefix must not parse");
        assert!(
            err.is_truncated(),
            "prefix of {k} bytes should fail as truncated, got {err:?}"
        );
    }
}

#[test]
fn prop_outbound_names_are_uncompressed() {
    // Repeated names in one message still serialize as full label
    // sequences; no 0xC0 prefix appears outside RDATA contents.
    let name = Name::from_str("repeat.example.com").unwrap();
    let mut msg = Message::query(Question::a(name.clone()));
    msg.add_answer(ResourceRecord::a(name, 60, Ipv4Addr::new(192, 0, 2, 1)));

    let wire = msg.to_wire();

    // "repeat.example.com." encodes as 20 bytes of labels. Both the
    // question name and the answer owner must occupy the full 20
    // bytes; a compression pointer would consume only 2.
    let parser = NameParser::new(&wire);
    assert_eq!(parser.skip_name(12).unwrap(), 20);
    assert_eq!(parser.skip_name(12 + 20 + 4).unwrap(), 20);

    let parsed = Message::parse(&wire).unwrap();
    assert_eq!(parsed.question().unwrap().qname.to_string(), "repeat.example.com.");
    assert_eq!(parsed.answers()[0].name().to_string(), "repeat.example.com.");
}

#[test]
fn lenient_mode_still_requires_section_counts() {
    // Header claims two answers but only one is present: lenient mode
    // does not excuse missing records.
    let mut wire = a_record_response();
    wire[7] = 0x02;

    assert!(Message::parse_lenient(&wire).is_err());
}

#[test]
fn strict_and_lenient_agree_on_clean_input() {
    let wire = a_record_response();

    let strict = Message::parse(&wire).unwrap();
    let lenient = Message::parse_lenient(&wire).unwrap();
    assert_eq!(strict, lenient);
}

#[test]
fn record_parse_modes_share_frame_handling() {
    // A record with an undecodable owner name fails in both modes.
    let wire = [0x40, 0x00, 0x00, 0x01];
    assert!(ResourceRecord::parse_with_mode(&wire, 0, ParseMode::Strict).is_err());
    assert!(ResourceRecord::parse_with_mode(&wire, 0, ParseMode::Lenient).is_err());
}

#[test]
fn dnssec_answer_sections_decode() {
    // A DS answer built by hand: key_tag 20326, algo 8, digest SHA-256.
    let mut wire = vec![
        0x00, 0x01, 0x81, 0x80, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    ];
    wire.extend_from_slice(&[0x01, b'd', 0x00]);
    wire.extend_from_slice(&[0x00, 0x2B, 0x00, 0x01]); // DS, IN
    wire.extend_from_slice(&[0x00, 0x00, 0x0E, 0x10]);
    wire.extend_from_slice(&[0x00, 0x24]); // rdlength 36
    wire.extend_from_slice(&[0x4F, 0x66]); // key tag
    wire.extend_from_slice(&[0x08, 0x02]); // algo, digest type
    wire.extend_from_slice(&[0xAB; 32]);

    let message = Message::parse(&wire).unwrap();
    match message.answers()[0].rdata() {
        RData::DS(ds) => {
            assert_eq!(ds.key_tag(), 20326);
            assert_eq!(ds.algorithm(), 8);
            assert_eq!(ds.digest().len(), 32);
        }
        other => panic!("expected DS, got {other:?}"),
    }
    assert!(message.answers()[0].is_dnssec());
}

#[test]
fn record_display_is_dig_like() {
    let message = Message::parse(&a_record_response()).unwrap();
    let rendered = message.answers()[0].to_string();

    assert_eq!(rendered, "query.\t100\tIN\tA\t123.45.67.9");
}
