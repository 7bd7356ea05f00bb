//! Python snippets run inside the scanner's interpreter.
//!
//! Wire format: the request `{"targets": [...], "options": {...}}` is read
//! from stdin and the scan result is written to stdout as a single JSON
//! document. Whatever the scanner prints while it runs goes to stderr.

/// Name of the module exposing the scanner, relative to the scanner root.
const SCANNER_MODULE: &str = "main";

/// Name of the scanner class inside [`SCANNER_MODULE`].
const SCANNER_CLASS: &str = "VulnerabilityScanner";

/// Encoder fallback for values the stdlib encoder rejects. Dates become
/// RFC 1123 strings in GMT, decimals and UUIDs their string form, and
/// dataclasses dicts.
const ENCODER_DEFAULT: &str = "\
import dataclasses, datetime, decimal, email.utils, uuid
def encode_default(o):
    if isinstance(o, datetime.date):
        if not isinstance(o, datetime.datetime):
            o = datetime.datetime.combine(o, datetime.time())
        if o.tzinfo is None:
            o = o.replace(tzinfo=datetime.timezone.utc)
        return email.utils.format_datetime(o.astimezone(datetime.timezone.utc), usegmt=True)
    if isinstance(o, (decimal.Decimal, uuid.UUID)):
        return str(o)
    if dataclasses.is_dataclass(o) and not isinstance(o, type):
        return dataclasses.asdict(o)
    if hasattr(o, '__html__'):
        return str(o.__html__())
    raise TypeError('Object of type %s is not JSON serializable' % type(o).__name__)
";

fn import_line() -> String {
    format!("from {} import {}", SCANNER_MODULE, SCANNER_CLASS)
}

/// Imports the scanner and exits; a non-zero exit means it is not importable.
pub fn import_check_script() -> String {
    format!(
        "import contextlib, sys\n\
         with contextlib.redirect_stdout(sys.stderr):\n    \
         {import}\n",
        import = import_line(),
    )
}

/// Runs one scan.
pub fn scan_script() -> String {
    format!(
        "import contextlib, json, sys\n\
         {encoder}\
         out = sys.stdout\n\
         request = json.load(sys.stdin)\n\
         with contextlib.redirect_stdout(sys.stderr):\n    \
         {import}\n    \
         result = {class}().run_scan(request['targets'], request['options'])\n\
         json.dump(result, out, default=encode_default)\n\
         out.flush()\n",
        encoder = ENCODER_DEFAULT,
        import = import_line(),
        class = SCANNER_CLASS,
    )
}
