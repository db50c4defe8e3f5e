/*!
A hand-checked excerpt of the `europe` file of the IANA time zone
database (which is in the public domain). It is just big enough to
exercise every rule form the parser and the resolution engine support:
all three time reference suffixes, all three day specifications, a
sub-minute local mean time offset, a `min`-less bounded rule set, an
unbounded one, and zones whose periods switch between rule sets.
*/

pub(crate) const EUROPE: &str = "\
# Rule  NAME     FROM  TO    TYPE  IN   ON       AT     SAVE  LETTER/S
Rule    GB-Eire  1972  1980  -     Mar  Sun>=16  2:00s  1:00  BST
Rule    GB-Eire  1972  1980  -     Oct  Sun>=23  2:00s  0     GMT
Rule    GB-Eire  1981  1995  -     Mar  lastSun  1:00u  1:00  BST
Rule    GB-Eire  1981  1989  -     Oct  Sun>=23  1:00u  0     GMT
Rule    GB-Eire  1990  1995  -     Oct  Sun>=22  1:00u  0     GMT

Rule    EU       1977  1980  -     Apr  Sun>=1   1:00u  1:00  S
Rule    EU       1977  only  -     Sep  lastSun  1:00u  0     -
Rule    EU       1978  only  -     Oct   1       1:00u  0     -
Rule    EU       1979  1995  -     Sep  lastSun  1:00u  0     -
Rule    EU       1981  max   -     Mar  lastSun  1:00u  1:00  S
Rule    EU       1996  max   -     Oct  lastSun  1:00u  0     -

Rule    Albania  1974  only  -     May   4       0:00   1:00  S
Rule    Albania  1974  only  -     Oct   2       0:00   0     -
Rule    Albania  1980  only  -     May   3       0:00   1:00  S
Rule    Albania  1980  only  -     Oct   4       0:00   0     -
Rule    Albania  1984  only  -     Apr   1       0:00   1:00  S

# Zone  NAME            STDOFF    RULES    FORMAT   [UNTIL]
Zone    Europe/London   -0:01:15  -        LMT      1847 Dec  1 0:00s
                         0:00     GB-Eire  %s       1968 Oct 27
                         1:00     -        BST      1971 Oct 31 2:00u
                         0:00     GB-Eire  %s       1996
                         0:00     EU       GMT/BST

Zone    Europe/Tirane    1:19:20  -        LMT      1914
                         1:00     -        CET      1940 Jun 16
                         1:00     Albania  CE%sT    1984 Jul  1
                         1:00     EU       CE%sT
";
