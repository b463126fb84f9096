//! Sample feed text in the formats the ingestion crate reads.

/// Header line of the seven-day event feed.
pub const EVENT_FEED_HEADER: &str =
    "Src,Eqid,Version,Datetime,Lat,Lon,Magnitude,Depth,NST,Region";

/// A small event feed: header plus three well-formed events.
pub const SAMPLE_EVENT_FEED: &str = "\
Src,Eqid,Version,Datetime,Lat,Lon,Magnitude,Depth,NST,Region
ci,10937725,1,\"Thursday, April  7, 2011 21:48:15 UTC\",34.0462,-117.2463,1.6,15.70,39,\"Southern California\"
us,c0002kst,6,\"Thursday, April  7, 2011 14:32:43 UTC\",38.2010,141.9200,7.1,49.00,344,\"near the east coast of Honshu, Japan\"
ak,10208484,1,\"Wednesday, April  6, 2011 23:05:11 UTC\",61.2925,-150.6071,2.3,33.10,12,\"Southern Alaska\"
";

/// Reference instant matching [`SAMPLE_EVENT_FEED`]: shortly after the newest event.
pub const SAMPLE_FEED_NOW: &str = "2011-04-08T00:00:00Z";

/// One event whose timestamp does not match any supported format.
pub const UNDATED_EVENT_LINE: &str =
    "nc,71559256,0,\"sometime last week\",37.5,-122.0,2.0,5.0,20,\"Northern California\"";

/// A few coastline samples in `latitude longitude` order, including a
/// duplicate and one longitude past the antimeridian.
pub const SAMPLE_COASTLINE: &str = "\
51.5 -0.1
51.5 -0.1
-33.9 18.4
64.1 190.0
";
