use combine::error::*;
use combine::parser::char::*;
use combine::parser::combinator::*;
use combine::stream::StreamErrorFor;
use combine::*;
use combine::{ParseError, Parser, Stream};

use crate::id::{Mid, Ssrc};

use super::data::*;

/// Creates a parser of SDP
pub fn sdp_parser<Input>() -> impl Parser<Input, Output = Sdp>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (
        session_parser(),
        many::<Vec<_>, _, _>(media_parser()),
        eof(),
    )
        .map(|(session, media_lines, _)| Sdp {
            session,
            media_lines,
            line_end: LineEnd::default(),
            trailing_line_end: true,
        })
}

// /////////////////////////////////////////////////// Session description

/// First line must be v=0. We don't munge anything in the session part, so
/// the remaining lines up to the first m= are taken as is.
fn session_parser<Input>() -> impl Parser<Input, Output = Session>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (
        typed_line('v', raw_value()).map(|v| format!("v={v}")),
        many::<Vec<_>, _, _>(raw_line(|c| c != 'm')),
    )
        .map(|(v, mut rest)| {
            rest.insert(0, v);
            Session { lines: rest }
        })
}

// /////////////////////////////////////////////////// Media description

/// A m= section with attributes, until next m= or EOF
fn media_parser<Input>() -> impl Parser<Input, Output = MediaLine>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (media_line(), many::<Vec<_>, _, _>(media_attribute_line()))
        .map(|((typ, rest), attrs)| MediaLine { typ, rest, attrs })
}

/// The m= line
// m=audio 9 UDP/TLS/RTP/SAVPF 111
// m=video 9 UDP/TLS/RTP/SAVPF 96 97 125 107 100 101
// m=application 9 UDP/DTLS/SCTP webrtc-datachannel
fn media_line<Input>() -> impl Parser<Input, Output = (MediaType, String)>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    typed_line('m', (not_sp().map(MediaType::from), token(' '), any_value()))
        .map(|(typ, _, rest)| (typ, rest))
}

/// Lines following an m= line.
fn media_attribute_line<Input>() -> impl Parser<Input, Output = MediaAttribute>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    // a=mid:0
    let mid = attribute_line("mid", any_value())
        .map(Mid::from)
        .map(MediaAttribute::Mid);

    let direction = choice((
        attempt(attribute_line_flag("recvonly").map(|_| MediaAttribute::RecvOnly)),
        attempt(attribute_line_flag("sendrecv").map(|_| MediaAttribute::SendRecv)),
        attempt(attribute_line_flag("sendonly").map(|_| MediaAttribute::SendOnly)),
        attempt(attribute_line_flag("inactive").map(|_| MediaAttribute::Inactive)),
    ));

    // a=msid:5UUdwiuY7OML2EkQtF38pJtNP5v7In1LhjEK f78dde68-7055-4e20-bb37-433803dd1ed1
    // a=msid:- f78dde68-7055-4e20-bb37-433803dd1ed1
    // a=msid:5UUdwiuY7OML2EkQtF38pJtNP5v7In1LhjEK
    let msid = attribute_line("msid", (not_sp(), optional((token(' '), any_value())))).map(
        |(stream_id, track)| {
            MediaAttribute::Msid(Msid {
                stream_id,
                track_id: track.map(|(_, t)| t),
            })
        },
    );

    // a=ssrc-group:FID 1111 2222
    let ssrc_group = attribute_line(
        "ssrc-group",
        (not_sp(), token(' '), sep_by1(ssrc(), token(' '))),
    )
    .map(|(semantics, _, ssrcs): (String, _, Vec<Ssrc>)| {
        MediaAttribute::SsrcGroup(SourceGroup {
            semantics: semantics.into(),
            ssrcs,
        })
    });

    // a=ssrc:3948621874 cname:xeXs3aE9AOBn00yJ
    // a=ssrc:3948621874 msid:5UUdwiuY7OML2EkQtF38pJtNP5v7In1LhjEK f78dde68-7055-4e20-bb37-433803dd1ed1
    // a=ssrc:3948621874 mslabel:5UUdwiuY7OML2EkQtF38pJtNP5v7In1LhjEK
    let ssrc_attr = attribute_line(
        "ssrc",
        (
            ssrc(),
            token(' '),
            many1::<String, _, _>(satisfy(|c| c != ':' && c != '\r' && c != '\n')),
            token(':'),
            raw_value(),
        ),
    )
    .map(|(ssrc, _, kind, _, value)| {
        MediaAttribute::Ssrc(SourceAttribute {
            ssrc,
            kind: kind.into(),
            value,
        })
    });

    let unused = typed_line('a', raw_value()).map(MediaAttribute::Unused);

    // c=, b=, i= and anything else that isn't an a= line.
    let other = line(
        satisfy(|c| c != 'm' && c != 'a' && c != '\r' && c != '\n'),
        raw_value(),
    )
    .map(|(typ, value)| MediaAttribute::Other(typ, value));

    choice((
        attempt(mid),
        attempt(direction),
        attempt(msid),
        attempt(ssrc_group),
        attempt(ssrc_attr),
        attempt(unused),
        other,
    ))
}

// /////////////////////////////////////////////////// Generic things below

/// Numeric SSRC. Only plain digits so that writing it back is exact.
fn ssrc<Input>() -> impl Parser<Input, Output = Ssrc>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    many1::<String, _, _>(digit()).and_then(|s| {
        if s.len() > 1 && s.starts_with('0') {
            return Err(StreamErrorFor::<Input>::message_static_message(
                "ssrc with leading zero",
            ));
        }
        s.parse::<u32>()
            .map(Ssrc::from)
            .map_err(StreamErrorFor::<Input>::message_format)
    })
}

/// An a= line that with value like: `a=<attribute>:<value>`.
fn attribute_line<Input, Pval, Out>(
    attribute: &'static str,
    val: Pval,
) -> impl Parser<Input, Output = Out>
where
    Input: Stream<Token = char>,
    Pval: Parser<Input, Output = Out>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    typed_line('a', (string(attribute), token(':'), val)).map(|(_, _, val)| val)
}

/// An a= line that has no value like: `a=sendrecv`.
fn attribute_line_flag<Input>(attribute: &'static str) -> impl Parser<Input, Output = ()>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    typed_line('a', (string(attribute)).map(|_| ()))
}

/// A line of any type matching `accept`, returned verbatim as `x=value`.
fn raw_line<Input, F>(mut accept: F) -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
    F: FnMut(char) -> bool,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    line(
        satisfy(move |c: char| c != '\r' && c != '\n' && accept(c)),
        raw_value(),
    )
    .map(|(typ, value)| format!("{typ}={value}"))
}

/// A specific line
fn typed_line<Input, Pval, Out>(expected: char, val: Pval) -> impl Parser<Input, Output = Out>
where
    Input: Stream<Token = char>,
    Pval: Parser<Input, Output = Out>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    line(token(expected), val).map(|(_, val)| val)
}

/// A line with some parser for value and parser for type.
fn line<Input, Ptyp, Pval, Out>(typ: Ptyp, val: Pval) -> impl Parser<Input, Output = (char, Out)>
where
    Ptyp: Parser<Input, Output = char>,
    Pval: Parser<Input, Output = Out>,
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    attempt((typ, token('='), val, line_end()))
        .map(|(typ, _, value, _)| (typ, value))
        .message("sdp line")
}

/// Not SP, \r or \n
fn not_sp<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    many1(satisfy(|c| c != ' ' && c != '\r' && c != '\n'))
}

/// Any value that isn't \r or \n.
fn any_value<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    many1(satisfy(|c| c != '\r' && c != '\n'))
}

/// Like [`any_value`] but also accepts nothing, for `s=` and friends.
fn raw_value<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    many(satisfy(|c| c != '\r' && c != '\n'))
}

/// We discovered a stray \n in safari SDP. This line end handles \r\n, \n or EOF.
fn line_end<Input>() -> impl Parser<Input, Output = ()>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    choice((crlf().map(|_| ()), newline().map(|_| ()), eof()))
}
