/*!

This is the long-form manual for `tier_tally` and `tiertally`.

## Tiers

A tier table is an ordered list of tiers, from the best to the worst. Each tier has a
label and a `criteria`, which is a percentage of the population: with a population of
500, a criteria of `6` gives a cutoff of 30 entries. An entity enters a tier when its
count is at least the cutoff of that tier and below the cutoff of the tier above. The
first tier has no upper bound. Entities below the last cutoff are reported as
unranked.

The criteria must be strictly decreasing. The program refuses to start otherwise.

The default table is:

| label | criteria | cutoff (population 500) |
|-------|----------|-------------------------|
| X     | 6        | 30                      |
| S+    | 5        | 25                      |
| S     | 4        | 20                      |
| A+    | 3        | 15                      |
| A     | 2        | 10                      |
| B+    | 1.5      | 7.5                     |
| B     | 1        | 5                       |
| C+    | 0.4      | 2                       |
| C     | 0.002    | 0.01                    |

## Voting counts

Each member has a list of counts for each of the two regions (`NA` and `EU`) and a
region for voting. The region for voting shows all its counts. The other region only
shows the second and third counts. Every list must have at least 3 counts: a row with
fewer counts is skipped and listed in `skippedRows`.

Each displayed list is split in two halves: position `i` (starting at 0) of a list of
length `n` is in the upper half when `i + 1 <= n / 2`. The middle element of an odd
list is in the lower half. A member passes when the percentage is at least 50.

## Input formats

The following providers are supported:
* `json`
* `csv`

### Trends, `json`

An array of objects:

```text
[
  { "identity": "Splattershot", "count": 42, "averagePower": 2741.3 },
  { "identity": "Range Blaster", "count": 1 }
]
```

### Trends, `csv`

```text
weapon,count,average power
Splattershot,42,2741.3
Range Blaster,1,
```

The identity is read from `identityColumnIndex` (default 1), the count from
`countColumnIndex` (default 2) and the optional average power from
`powerColumnIndex` (default 3). The first row read is `firstRowIndex` (default 2, which skips the
header). All the indexes start at 1.

### Voting history, `json`

```text
[
  {
    "name": "Sendou",
    "percentage": 75.0,
    "countsNA": [10, 3, 7, 9],
    "countsEU": [2, 1, 4, 0],
    "regionForVoting": "NA",
    "wasSuggested": false,
    "wasVouched": true
  }
]
```

`wasSuggested` and `wasVouched` are optional.

### Voting history, `csv`

```text
name,percentage,region,counts NA,counts EU,suggested,vouched
Sendou,75,NA,10/3/7/9,2/1/4/0,false,true
```

The counts are separated with `countsDelimiter` (default `/`). The last two columns are
optional.

## Configuration

```text
{
  "outputSettings": { "reportName": "Splat Zones, April 2021" },
  "tierSettings": {
    "populationSize": 500,
    "tiers": [{ "label": "X", "criteria": 6, "color": "purple.700" }]
  },
  "trendSources": [{ "provider": "json", "filePath": "weapons.json" }],
  "historySources": [{ "provider": "csv", "filePath": "history.csv" }]
}
```

`tierSettings` is optional and defaults to the table above. The paths of the sources
are relative to the configuration file. `outputSettings.outputPath`, when present, is
where the report is written (the `--out` option takes precedence).

## Report

The report is a JSON document with the keys `config`, `tiers` and `unranked` (when
there are trend sources), `history` and `skippedRows` (when there are history sources).

 */
