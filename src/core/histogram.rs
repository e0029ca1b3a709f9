use std::io::{self, Write};

/**
 * Fast and simple histogram for non-negative data, used to summarize the
 * distribution of iteration counts across a rendered grid. Data below zero
 * lands in the first bin; data at or above `max_val` lands in the last bin.
 */
#[derive(Debug, Clone)]
pub struct Histogram {
    bin_counts: Vec<u32>,
    data_to_index_scale: f32,
    bin_width: f32,
}

impl Histogram {
    pub fn new(num_bins: usize, max_val: f32) -> Histogram {
        assert!(num_bins > 0, "`num_bins` must be positive!");
        assert!(max_val > 0.0, "`max_val` must be positive!");
        let data_to_index_scale = (num_bins as f32) / max_val;
        Histogram {
            bin_counts: vec![0; num_bins],
            data_to_index_scale,
            bin_width: 1.0 / data_to_index_scale,
        }
    }

    /// Insert a data point into the histogram
    pub fn insert(&mut self, data: f32) {
        let last_bin = self.num_bins() - 1;
        let index = if data < 0.0 {
            0
        } else {
            ((data * self.data_to_index_scale) as usize).min(last_bin)
        };
        self.bin_counts[index] += 1;
    }

    pub fn num_bins(&self) -> usize {
        self.bin_counts.len()
    }

    pub fn bin_count(&self, index: usize) -> u32 {
        self.bin_counts[index]
    }

    /// @return: the total number of data points that have been inserted
    /// into the histogram. This is the sum of the count in all bins.
    pub fn total_count(&self) -> u32 {
        self.bin_counts.iter().sum()
    }

    /// @return: the lower edge of the specified bin (inclusive)
    pub fn lower_edge(&self, bin_index: usize) -> f32 {
        self.bin_width * (bin_index as f32)
    }

    /// @return: the upper edge of the specified bin (exclusive)
    pub fn upper_edge(&self, bin_index: usize) -> f32 {
        self.bin_width * ((bin_index + 1) as f32)
    }

    pub(crate) fn data_to_index_scale(&self) -> f32 {
        self.data_to_index_scale
    }

    /// Print the histogram stats to the writer
    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "Histogram:")?;
        let total = self.total_count();
        let percent_scale = if total == 0 {
            0.0
        } else {
            100.0 / (total as f32)
        };
        writeln!(writer, "  total count: {}", total)?;
        for i in 0..self.num_bins() {
            let count = self.bin_count(i);
            writeln!(
                writer,
                "  bins[{}]:  [{:.2}, {:.2}) --> {}  ({:.2}%)",
                i,
                self.lower_edge(i),
                self.upper_edge(i),
                count,
                (count as f32) * percent_scale
            )?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

/**
 * Piecewise-linear cumulative distribution function, derived from a
 * histogram. Maps a data value to its fractional position within the
 * inserted population, on [0,1].
 */
#[derive(Debug)]
pub struct CumulativeDistributionFunction {
    offset: Vec<f32>, // n_bins
    scale: Vec<f32>,  // n_bins
    data_to_index_scale: f32,
    pub min_data: f32, // --> maps to 0.0
    pub max_data: f32, // --> maps to 1.0
}

impl CumulativeDistributionFunction {
    pub fn new(histogram: &Histogram) -> CumulativeDistributionFunction {
        let n_bins = histogram.num_bins();
        let mut cdf = CumulativeDistributionFunction {
            offset: vec![0.0; n_bins],
            scale: vec![0.0; n_bins],
            data_to_index_scale: histogram.data_to_index_scale(),
            min_data: histogram.lower_edge(0),
            max_data: histogram.upper_edge(n_bins - 1),
        };

        if histogram.total_count() == 0 {
            // Degenerate case: no data. Return the population midpoint for
            // any in-domain query rather than crashing.
            cdf.offset.iter_mut().for_each(|x| *x = 0.5);
            return cdf;
        }

        // x = data (input)
        // y = value (output, fraction within population)
        let scale_bin_count_to_fraction = 1.0 / (histogram.total_count() as f32);
        let mut accumulated_count = 0;
        let mut y_low = 0.0;
        for i in 0..n_bins {
            accumulated_count += histogram.bin_count(i);
            let y_upp = (accumulated_count as f32) * scale_bin_count_to_fraction;
            let x_low = histogram.lower_edge(i);
            let dy_dx = (y_upp - y_low) * histogram.data_to_index_scale();
            cdf.offset[i] = y_low - x_low * dy_dx;
            cdf.scale[i] = dy_dx;
            y_low = y_upp; // for the next iteration
        }
        cdf
    }

    /**
     * @param data: data point, same units as would be used in the histogram
     * @return: fractional position within the population of the histogram on [0,1]
     *
     * Note:  if the histogram is empty, then all in-domain queries return 0.5.
     */
    pub fn percentile(&self, data: f32) -> f32 {
        if data <= self.min_data {
            return 0.0;
        }
        let bin_index = (data * self.data_to_index_scale) as usize;
        if bin_index >= self.offset.len() {
            return 1.0;
        }
        // Interpolating coefficients are precomputed in the constructor.
        self.offset[bin_index] + data * self.scale[bin_index]
    }

    /**
     * Print the CDF to the writer for debug
     */
    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "CDF:")?;
        let n_bins = self.offset.len();
        writeln!(
            writer,
            "  n_bins: {}, min_data: {}, max_data: {}",
            n_bins, self.min_data, self.max_data
        )?;
        let scale = 1.0 / self.data_to_index_scale;
        for i in 0..(n_bins + 1) {
            let data = (i as f32) * scale;
            writeln!(writer, "  {:.2}  -->  {:.4}", data, self.percentile(data))?;
        }
        writeln!(writer)?;
        Ok(())
    }
}
